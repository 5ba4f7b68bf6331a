use futures::executor::block_on;
use upsell_core::{AffordanceLabels, Product, SelectionController};
use upsell_web::app::App;
use upsell_web::components::SelectorPanel;
use upsell_web::components::selector_panel::Props;
use upsell_web::view_model::build_panel_view;
use yew::{Callback, LocalServerRenderer};

fn controller() -> SelectionController {
    SelectionController::initialize(
        [
            Product::new("bracelet", 100, "Bracelet"),
            Product::new("card", 50, "Card"),
        ],
        AffordanceLabels::default(),
    )
}

fn render_panel(ctl: &SelectionController) -> String {
    let props = Props {
        view: build_panel_view(ctl),
        on_toggle: Callback::noop(),
        on_continue: Callback::noop(),
    };
    block_on(LocalServerRenderer::<SelectorPanel>::with_props(props).render())
}

#[test]
fn panel_renders_every_product_and_live_region() {
    let html = render_panel(&controller());
    assert!(html.contains("data-product=\"bracelet\""), "{html}");
    assert!(html.contains("data-product=\"card\""), "{html}");
    assert!(html.contains("100 ₽"));
    assert!(html.contains("Select at least one product"));
    assert!(html.contains("id=\"selector-status\""), "{html}");
}

#[test]
fn panel_reflects_selection_total() {
    let mut ctl = controller();
    ctl.toggle("bracelet");
    ctl.toggle("card");
    let html = render_panel(&ctl);
    assert!(html.contains("Continue for 150 ₽"), "{html}");
    assert_eq!(html.matches("data-state=\"selected\"").count(), 2, "{html}");
}

#[test]
fn app_renders_bundled_landing_config() {
    let html = block_on(LocalServerRenderer::<App>::new().render());
    for id in ["bracelet", "card", "trinket", "sticker", "stand"] {
        assert!(
            html.contains(&format!("data-product=\"{id}\"")),
            "missing {id} in {html}"
        );
    }
    assert!(html.contains("Выберите хотя бы 1 товар"), "{html}");
    assert!(html.contains("490 ₽"), "{html}");
}
