use super::continue_button::ContinueButton;
use super::product_button::ProductButton;
use crate::a11y::STATUS_REGION_ID;
use crate::view_model::PanelView;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub view: PanelView,
    pub on_toggle: Callback<String>,
    pub on_continue: Callback<()>,
}

/// Product buttons plus the continue control. Stateless: the caller owns the
/// selection and passes the derived view back in.
#[function_component(SelectorPanel)]
pub fn selector_panel(p: &Props) -> Html {
    html! {
        <section role="region" aria-label="Add-on products" class="product-selector">
            <ul class="product-list">
                { for p.view.products.iter().map(|tile| html! {
                    <li key={tile.display.product_id.clone()}>
                        <ProductButton tile={tile.clone()} on_toggle={p.on_toggle.clone()} />
                    </li>
                }) }
            </ul>
            <ContinueButton affordance={p.view.affordance.clone()} on_continue={p.on_continue.clone()} />
            <p id={STATUS_REGION_ID} class="sr-only" aria-live="polite"></p>
        </section>
    }
}
