use yew::prelude::*;

use super::{client_from, page_shell, persona_options, result_card, section, textarea_class};
use crate::config::ClientConfig;
use crate::format::Tone;
use crate::models::{Entity, NluRequest, NluResult, DEFAULT_NLU_PERSONA};
use crate::panel::{render_panel, run_panel, FlowError, PanelState, RequestTracker};

pub const NO_ENTITIES: &str = "No entities detected";

#[function_component(NluPage)]
pub fn nlu_page() -> Html {
    let api = client_from(use_context::<ClientConfig>());
    let text = use_state(String::new);
    let persona = use_state(|| DEFAULT_NLU_PERSONA.to_string());
    let result = use_state(|| PanelState::<NluResult>::Idle);
    let tracker = use_state(RequestTracker::default);

    let on_submit = {
        let text = text.clone();
        let persona = persona.clone();
        let result = result.clone();
        let tracker = tracker.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let req = NluRequest::new((*text).clone(), Some((*persona).clone()));
            log::debug!("nlu: analyzing text as {}", req.persona);
            let api = api.clone();
            run_panel("nlu", result.clone(), (*tracker).clone(), async move {
                api.analyze_text(&req).await.map_err(FlowError::from)
            });
        })
    };

    let on_persona = {
        let persona = persona.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            persona.set(select.value());
        })
    };

    html! {
        { page_shell(
            "Text Analysis",
            html! {},
            html! {
                <>
                    <form class="bg-card rounded-[10px] p-6 border border-border space-y-4" onsubmit={on_submit}>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Text"}</label>
                            <textarea rows="4" class={textarea_class()}
                                placeholder="I spent $500 on groceries last week"
                                value={(*text).clone()}
                                oninput={{
                                    let text = text.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                        text.set(input.value());
                                    })
                                }} />
                        </div>
                        <div class="flex items-center gap-3">
                            <label class="text-sm font-medium text-foreground">{"Persona"}</label>
                            <select class="p-2 border rounded" onchange={on_persona}>
                                <option value={DEFAULT_NLU_PERSONA} selected={*persona == DEFAULT_NLU_PERSONA}>{"General"}</option>
                                { persona_options(&persona) }
                            </select>
                            <button type="submit" class="ml-auto bg-primary text-primary-foreground px-4 py-2 rounded-lg font-semibold"
                                disabled={*result == PanelState::Loading}>
                                {"Analyze"}
                            </button>
                        </div>
                    </form>

                    { render_panel(&*result, |analysis| html! { <NluView analysis={analysis.clone()} /> }) }
                </>
            }
        ) }
    }
}

/// Upper-cased badge text and its tone.
pub fn sentiment_badge(sentiment: &str) -> (String, Tone) {
    (sentiment.to_uppercase(), Tone::for_sentiment(sentiment))
}

pub fn entity_cards(entities: &[Entity]) -> Option<Vec<String>> {
    if entities.is_empty() {
        None
    } else {
        Some(entities.iter().map(Entity::label).collect())
    }
}

#[derive(Properties, PartialEq)]
pub struct NluViewProps {
    pub analysis: NluResult,
}

#[function_component(NluView)]
pub fn nlu_view(props: &NluViewProps) -> Html {
    let analysis = &props.analysis;
    let (sentiment, tone) = sentiment_badge(&analysis.sentiment);

    let entities = match entity_cards(&analysis.entities) {
        Some(cards) => html! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                { for cards.into_iter().map(|card| html! {
                    <div class="p-3 border rounded text-sm text-foreground">{ card }</div>
                }) }
            </div>
        },
        None => html! { <p class="text-sm text-muted-foreground">{ NO_ENTITIES }</p> },
    };

    result_card(
        "Analysis Result",
        html! {
            <>
                { section("Sentiment", html! {
                    <span class={classes!("px-3", "py-1", "rounded-full", "text-xs", "font-bold", tone.badge_class())}>
                        { sentiment }
                    </span>
                }) }
                { section("Entities", entities) }
                { section("Keywords", html! {
                    <div class="flex flex-wrap gap-2">
                        { for analysis.keywords.iter().map(|keyword| html! {
                            <span class="px-2 py-1 rounded-full text-xs bg-emerald-100 text-emerald-700">{ keyword.clone() }</span>
                        }) }
                    </div>
                }) }
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(kind: &str, text: &str, value: &str) -> Entity {
        Entity {
            kind: kind.into(),
            text: text.into(),
            value: value.into(),
        }
    }

    #[test]
    fn no_entities_means_placeholder() {
        assert_eq!(entity_cards(&[]), None);
    }

    #[test]
    fn single_entity_card_text() {
        let cards = entity_cards(&[entity("AMOUNT", "$50", "50")]).unwrap();
        assert_eq!(cards, ["AMOUNT: $50 (50)"]);
    }

    #[test]
    fn sentiment_badge_is_upper_cased_and_toned() {
        assert_eq!(sentiment_badge("positive"), ("POSITIVE".into(), Tone::Favorable));
        assert_eq!(sentiment_badge("negative"), ("NEGATIVE".into(), Tone::Unfavorable));
        assert_eq!(sentiment_badge("neutral"), ("NEUTRAL".into(), Tone::Cautionary));
    }
}
