use crate::browser::web_session;
use crate::components::SelectorPanel;
use crate::config::load_landing_config;
use crate::view_model::build_panel_view;
use crate::{a11y, dom};
use upsell_core::{LandingConfig, StartOutcome};
use yew::prelude::*;

/// Landing widget root: owns the session and re-derives the panel view after
/// every toggle.
#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |()| {
        load_landing_config().unwrap_or_else(|e| {
            dom::console_error(&format!("Failed to load landing config: {e}"));
            LandingConfig::default()
        })
    });
    let session = {
        let config = config.clone();
        use_mut_ref(move || web_session(&config))
    };
    let view = {
        let session = session.clone();
        use_state(move || build_panel_view(session.borrow().controller()))
    };

    {
        let session = session.clone();
        use_effect_with((), move |()| {
            if session.borrow_mut().start() == StartOutcome::AlreadyCompleted {
                log::info!("landing flow already completed on this device");
            }
        });
    }

    let on_toggle = {
        let session = session.clone();
        let view = view.clone();
        Callback::from(move |product_id: String| {
            let mut sess = session.borrow_mut();
            if sess.toggle(&product_id).is_some() {
                let next = build_panel_view(sess.controller());
                a11y::set_status(&next.affordance.label);
                view.set(next);
            }
        })
    };

    let on_continue = Callback::from(move |()| {
        if let Some(summary) = session.borrow_mut().confirm() {
            log::info!(
                "confirmed {:?} for {}",
                summary.selected_ids,
                summary.total_price
            );
        }
    });

    html! {
        <SelectorPanel view={(*view).clone()} {on_toggle} {on_continue} />
    }
}
