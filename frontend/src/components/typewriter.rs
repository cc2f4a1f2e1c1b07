use yew::prelude::*;
use gloo_timers::callback::Timeout;
use log::warn;

use crate::animation::typewriter::PhraseCycle;

#[derive(Properties, PartialEq)]
pub struct TypewriterProps {
    pub phrases: Vec<String>,
    #[prop_or_default]
    pub class: Classes,
}

fn start(phrases: &[String]) -> Option<PhraseCycle> {
    match PhraseCycle::new(phrases.iter().cloned()) {
        Ok(cycle) => Some(cycle),
        Err(e) => {
            warn!("Typewriter not started: {}", e);
            None
        }
    }
}

/// A running cycle over other phrases, or none when phrases are now present.
fn needs_restart(current: Option<&PhraseCycle>, phrases: &[String]) -> bool {
    match current {
        Some(cycle) => !cycle.plays(phrases),
        None => !phrases.is_empty(),
    }
}

#[function_component(Typewriter)]
pub fn typewriter(props: &TypewriterProps) -> Html {
    let cycle = use_state(|| start(&props.phrases));

    {
        let cycle = cycle.clone();
        use_effect_with_deps(
            move |phrases: &Vec<String>| {
                if needs_restart((*cycle).as_ref(), phrases) {
                    cycle.set(start(phrases));
                }
                || ()
            },
            props.phrases.clone(),
        );
    }

    {
        let setter = cycle.setter();
        use_effect_with_deps(
            move |current: &Option<PhraseCycle>| {
                // One pending tick per state; dropping the Timeout cancels it.
                let pending = current.clone().map(|state| {
                    Timeout::new(state.tick_delay_ms(), move || {
                        let (next, _) = state.tick(js_sys::Math::random());
                        setter.set(Some(next));
                    })
                });
                move || drop(pending)
            },
            (*cycle).clone(),
        );
    }

    let text = (*cycle)
        .as_ref()
        .map(|c| c.displayed_text().to_string())
        .unwrap_or_default();

    html! {
        <span class={classes!("typewriter", props.class.clone())} aria-live="polite">
            <style>
                {r#"
                    .typewriter-caret {
                        display: inline-block;
                        margin-left: 2px;
                        color: #7EB2FF;
                        animation: caret-blink 1s steps(1) infinite;
                    }
                    @keyframes caret-blink {
                        50% { opacity: 0; }
                    }
                "#}
            </style>
            <span class="typewriter-text">{text}</span>
            <span class="typewriter-caret" aria-hidden="true">{"|"}</span>
        </span>
    }
}
