use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod api;
mod charts;
mod chat;
mod config;
mod format;
mod models;
mod pages;
mod panel;

use config::ClientConfig;
use models::HealthStatus;
use pages::{client_from, BudgetPage, ChatPage, InsightsPage, NluPage};

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Budget,
    Insights,
    Chat,
    Analysis,
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

fn health_label(health: &Result<HealthStatus, String>) -> (String, &'static str) {
    match health {
        Ok(status) => {
            let label = match &status.model {
                Some(model) => format!("API: {} · {}", status.status, model),
                None => format!("API: {}", status.status),
            };
            (label, "bg-emerald-100 text-emerald-700")
        }
        Err(_) => ("API unreachable".to_string(), "bg-red-100 text-red-700"),
    }
}

#[function_component(Header)]
fn header() -> Html {
    let api = client_from(use_context::<ClientConfig>());
    let health = use_state(|| None::<Result<HealthStatus, String>>);

    {
        let health = health.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let status = api.health().await.map_err(|e| e.to_string());
                    if let Ok(status) = &status {
                        log::info!(
                            "backend is {} (environment: {})",
                            status.status,
                            status.environment.as_deref().unwrap_or("unknown")
                        );
                    }
                    health.set(Some(status));
                });
                || ()
            },
            (),
        );
    }

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex-1"></div>
            {
                match &*health {
                    None => html! {
                        <span class="px-3 py-1 rounded-full text-xs font-bold bg-slate-100 text-slate-500">{"Checking API..."}</span>
                    },
                    Some(result) => {
                        let (label, class) = health_label(result);
                        html! {
                            <span class={classes!("px-3", "py-1", "rounded-full", "text-xs", "font-bold", class)}>{ label }</span>
                        }
                    }
                }
            }
        </header>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Budget Summary",
            page: Page::Budget,
            icon: icon_wallet,
        },
        NavItem {
            label: "Spending Insights",
            page: Page::Insights,
            icon: icon_bar_chart,
        },
        NavItem {
            label: "Chat",
            page: Page::Chat,
            icon: icon_message,
        },
        NavItem {
            label: "Text Analysis",
            page: Page::Analysis,
            icon: icon_search,
        },
    ];

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center text-white">
                    { icon_target() }
                </div>
                <span class="text-[#173E63] text-xl font-black tracking-tight">{"FinanceBot"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let is_active = item.page == props.active_page;
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let active_page = use_state(|| Page::Budget);
    let config = use_state(ClientConfig::default);
    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    let content = match *active_page {
        Page::Budget => html! { <BudgetPage /> },
        Page::Insights => html! { <InsightsPage /> },
        Page::Chat => html! { <ChatPage /> },
        Page::Analysis => html! { <NluPage /> },
    };

    html! {
        <ContextProvider<ClientConfig> context={(*config).clone()}>
            <Layout active_page={*active_page} on_select={on_select}>
                { content }
            </Layout>
        </ContextProvider<ClientConfig>>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
fn icon_target() -> Html {
    icon_base("M12 12m-9 0a9 9 0 1018 0 9 9 0 10-18 0")
}
fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
fn icon_message() -> Html {
    icon_base("M21 15a2 2 0 01-2 2H7l-4 4V5a2 2 0 012-2h14a2 2 0 012 2z")
}
fn icon_search() -> Html {
    icon_base("M11 19a8 8 0 100-16 8 8 0 000 16zM21 21l-4.35-4.35")
}

fn main() {
    let config = ClientConfig::resolve();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!("finance assistant starting against {}", config.api_base);
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_backend_label_names_the_model() {
        let status = HealthStatus {
            status: "healthy".into(),
            environment: Some("local".into()),
            model: Some("mock".into()),
        };
        assert_eq!(health_label(&Ok(status)).0, "API: healthy · mock");
    }

    #[test]
    fn unreachable_backend_label() {
        let (label, class) = health_label(&Err("connection refused".into()));
        assert_eq!(label, "API unreachable");
        assert!(class.contains("red"));
    }
}
