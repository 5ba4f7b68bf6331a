use upsell_core::{ContinueAffordance, ProductDisplay, SelectionController};

/// One product button, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTile {
    pub display: ProductDisplay,
    /// Product name for assistive technology; the visible text is the price or selected label
    pub name: String,
}

/// Everything the selector panel shows, derived from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub products: Vec<ProductTile>,
    pub affordance: ContinueAffordance,
}

/// Build view model with resolved labels and per-product state
#[must_use]
pub fn build_panel_view(controller: &SelectionController) -> PanelView {
    let products = controller
        .displays()
        .into_iter()
        .map(|display| {
            let name = controller
                .catalog()
                .find(&display.product_id)
                .map(|p| p.label.clone())
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| display.product_id.clone());
            ProductTile { display, name }
        })
        .collect();
    PanelView {
        products,
        affordance: controller.affordance_state(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upsell_core::{AffordanceLabels, Product, ProductState};

    #[test]
    fn view_tracks_controller_state() {
        let mut ctl = SelectionController::initialize(
            [Product::new("bracelet", 100, "Bracelet"), Product::new("card", 50, "")],
            AffordanceLabels::default(),
        );
        let view = build_panel_view(&ctl);
        assert!(!view.affordance.enabled);
        assert_eq!(view.products[0].name, "Bracelet");
        assert_eq!(view.products[1].name, "card");

        ctl.toggle("card");
        let view = build_panel_view(&ctl);
        assert!(view.affordance.enabled);
        assert_eq!(view.products[1].display.state, ProductState::Selected);
        assert_eq!(view.products[1].display.label, "Selected");
        assert_eq!(view.products[0].display.label, "100 ₽");
    }
}
