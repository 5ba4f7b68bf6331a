use upsell_core::ContinueAffordance;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub affordance: ContinueAffordance,
    pub on_continue: Callback<()>,
}

#[function_component(ContinueButton)]
pub fn continue_button(p: &Props) -> Html {
    let enabled = p.affordance.enabled;
    let onclick = {
        let on_continue = p.on_continue.clone();
        Callback::from(move |_: MouseEvent| {
            if enabled {
                on_continue.emit(());
            }
        })
    };

    html! {
        <button type="button"
                id="continueButton"
                class="continue-button"
                disabled={!enabled}
                aria-disabled={(!enabled).to_string()}
                {onclick}>
            { p.affordance.label.clone() }
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(enabled: bool, label: &str) -> String {
        let props = Props {
            affordance: ContinueAffordance {
                enabled,
                label: label.to_string(),
            },
            on_continue: Callback::noop(),
        };
        block_on(LocalServerRenderer::<ContinueButton>::with_props(props).render())
    }

    #[test]
    fn disabled_without_selection() {
        let html = render(false, "Select at least one product");
        assert!(html.contains("aria-disabled=\"true\""), "{html}");
        assert!(html.contains("Select at least one product"));
    }

    #[test]
    fn enabled_with_total() {
        let html = render(true, "Continue for 150 ₽");
        assert!(html.contains("aria-disabled=\"false\""), "{html}");
        assert!(html.contains("Continue for 150 ₽"));
    }
}
