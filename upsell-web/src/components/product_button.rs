use crate::view_model::ProductTile;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub tile: ProductTile,
    pub on_toggle: Callback<String>,
}

#[function_component(ProductButton)]
pub fn product_button(p: &Props) -> Html {
    let display = &p.tile.display;
    let onclick = {
        let on_toggle = p.on_toggle.clone();
        let product_id = display.product_id.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(product_id.clone()))
    };
    let selected = display.state.is_selected();
    let class = classes!("product-button", selected.then_some("product-button--selected"));

    html! {
        <button type="button"
                {class}
                data-product={display.product_id.clone()}
                data-price={display.price.to_string()}
                data-state={display.state.data_state()}
                aria-pressed={selected.to_string()}
                aria-label={p.tile.name.clone()}
                {onclick}>
            { display.label.clone() }
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use upsell_core::{ProductDisplay, ProductState};
    use yew::LocalServerRenderer;

    fn props(state: ProductState, label: &str) -> Props {
        Props {
            tile: ProductTile {
                display: ProductDisplay {
                    product_id: "card".to_string(),
                    price: 50,
                    state,
                    label: label.to_string(),
                },
                name: "Card".to_string(),
            },
            on_toggle: Callback::noop(),
        }
    }

    #[test]
    fn price_state_renders_data_attributes() {
        let props = props(ProductState::PriceShown, "50 ₽");
        let html = block_on(LocalServerRenderer::<ProductButton>::with_props(props).render());
        assert!(html.contains("data-product=\"card\""), "{html}");
        assert!(html.contains("data-price=\"50\""), "{html}");
        assert!(html.contains("data-state=\"price\""), "{html}");
        assert!(html.contains("aria-pressed=\"false\""), "{html}");
        assert!(html.contains("50 ₽"));
    }

    #[test]
    fn selected_state_adds_modifier_class() {
        let props = props(ProductState::Selected, "Selected");
        let html = block_on(LocalServerRenderer::<ProductButton>::with_props(props).render());
        assert!(html.contains("product-button--selected"), "{html}");
        assert!(html.contains("data-state=\"selected\""), "{html}");
        assert!(html.contains("aria-pressed=\"true\""), "{html}");
    }
}
