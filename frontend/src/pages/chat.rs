use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{client_from, page_shell, persona_options};
use crate::chat::{ChatMessage, ChatSession, MessageKind};
use crate::config::ClientConfig;
use crate::models::GenerateRequest;
use crate::panel::{loading_indicator, FlowError};

fn persona_from(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[function_component(ChatPage)]
pub fn chat_page() -> Html {
    let api = client_from(use_context::<ClientConfig>());
    let session = use_mut_ref(ChatSession::default);
    let refresh = use_force_update();
    let draft = use_state(String::new);
    let persona = use_state(|| None::<String>);
    let list_ref = use_node_ref();

    // keep the newest message in view
    {
        let list_ref = list_ref.clone();
        let newest = session.borrow().messages().last().map(|m| m.id);
        use_effect_with_deps(
            move |_| {
                if let Some(list) = list_ref.cast::<web_sys::Element>() {
                    list.set_scroll_top(list.scroll_height());
                }
                || ()
            },
            newest,
        );
    }

    let send = {
        let session = session.clone();
        let refresh = refresh.clone();
        let draft = draft.clone();
        let persona = persona.clone();
        Callback::from(move |_: ()| {
            let Some(pending) = session.borrow_mut().submit(&draft) else {
                return;
            };
            draft.set(String::new());
            refresh.force_update();

            let placeholder = pending.placeholder;
            let req = GenerateRequest::new(pending.prompt, (*persona).clone());
            log::debug!("chat: sending prompt (persona: {:?})", req.persona);
            let api = api.clone();
            let session = session.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                let outcome = api
                    .generate(&req)
                    .await
                    .map_err(|err| FlowError::from(err).display());
                session.borrow_mut().resolve(placeholder, outcome);
                refresh.force_update();
            });
        })
    };

    let on_click = {
        let send = send.clone();
        Callback::from(move |_: MouseEvent| send.emit(()))
    };

    // Shift+Enter is left to the textarea
    let on_keydown = {
        let send = send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                send.emit(());
            }
        })
    };

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(input.value());
        })
    };

    let on_persona = {
        let persona = persona.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            persona.set(persona_from(select.value()));
        })
    };

    let session_view = session.borrow();
    let selected = persona.as_deref().unwrap_or_default();
    let turns = session_view.transcript().len();

    html! {
        { page_shell(
            "Chat",
            html! {
                <div class="flex items-center gap-3">
                    <span class="text-xs text-muted-foreground">{ format!("{} turns", turns) }</span>
                    <select class="p-2 border rounded text-sm" onchange={on_persona}>
                        <option value="" selected={selected.is_empty()}>{"General"}</option>
                        { persona_options(selected) }
                    </select>
                </div>
            },
            html! {
                <div class="bg-card rounded-[10px] border border-border flex flex-col h-[70vh]">
                    <div ref={list_ref} class="flex-1 overflow-y-auto p-6 space-y-3"
                        aria-busy={session_view.is_waiting().to_string()}>
                        {
                            if session_view.messages().is_empty() {
                                html! { <p class="text-sm text-muted-foreground text-center">{"Ask anything about budgeting, saving or spending."}</p> }
                            } else {
                                html! { <>{ for session_view.messages().iter().map(message_bubble) }</> }
                            }
                        }
                    </div>
                    <div class="border-t border-border p-4 flex gap-3 items-end">
                        <textarea rows="2"
                            class="flex-1 px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                            placeholder="Type a message..."
                            value={(*draft).clone()}
                            oninput={on_input}
                            onkeydown={on_keydown} />
                        <button type="button" onclick={on_click}
                            class="bg-primary text-primary-foreground px-4 py-2 rounded-lg font-semibold">
                            {"Send"}
                        </button>
                    </div>
                </div>
            }
        ) }
    }
}

fn message_bubble(message: &ChatMessage) -> Html {
    let (row, bubble) = match message.kind {
        MessageKind::User => ("justify-end", "bg-[#173E63] text-white"),
        MessageKind::Bot | MessageKind::Thinking => ("justify-start", "bg-[#eef4f9] text-foreground"),
        MessageKind::Error => ("justify-start", "bg-red-50 text-red-600 border border-red-200"),
    };

    html! {
        <div key={message.id.to_string()} id={format!("msg-{}", message.id)} class={classes!("flex", row)}>
            <div class={classes!("max-w-[75%]", "px-4", "py-2", "rounded-[10px]", "text-sm", "whitespace-pre-wrap", bubble)}>
                {
                    if message.kind == MessageKind::Thinking {
                        loading_indicator()
                    } else {
                        html! { { message.text.clone() } }
                    }
                }
                if let Some(caption) = &message.caption {
                    <p class="text-[10px] text-slate-400 mt-1">{ caption.clone() }</p>
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_persona_is_null() {
        assert_eq!(persona_from(String::new()), None);
        assert_eq!(persona_from("retiree".into()), Some("retiree".into()));
    }
}
