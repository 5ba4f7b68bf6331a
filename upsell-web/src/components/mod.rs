pub mod continue_button;
pub mod product_button;
pub mod selector_panel;

pub use continue_button::ContinueButton;
pub use product_button::ProductButton;
pub use selector_panel::SelectorPanel;
