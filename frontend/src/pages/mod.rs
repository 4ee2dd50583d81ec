use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::format::Tone;

mod budget;
mod chat;
mod insights;
mod nlu;

pub use budget::BudgetPage;
pub use chat::ChatPage;
pub use insights::InsightsPage;
pub use nlu::NluPage;

pub const CURRENCY_SYMBOL: &str = "$";

pub fn client_from(config: Option<ClientConfig>) -> ApiClient {
    let config = config.unwrap_or_default();
    ApiClient::new(&config.api_base)
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

pub fn result_card(title: &'static str, children: Html) -> Html {
    html! {
        <div class="bg-card rounded-[10px] p-6 border border-border space-y-6">
            <h3 class="font-bold text-foreground text-lg">{ title }</h3>
            { children }
        </div>
    }
}

pub fn section(title: &'static str, children: Html) -> Html {
    html! {
        <div>
            <h4 class="text-sm font-bold text-[#173E63] mb-3 tracking-wide">{ title }</h4>
            { children }
        </div>
    }
}

pub fn bullet_list(items: &[String], accent: &'static str) -> Html {
    html! {
        <ul class="space-y-2">
            { for items.iter().map(|item| html! {
                <li class={classes!("p-3", "bg-slate-50", "rounded", "border-l-4", "text-sm", "text-foreground", accent)}>
                    { item.clone() }
                </li>
            }) }
        </ul>
    }
}

pub fn persona_options(selected: &str) -> Html {
    html! {
        <>
            { for crate::models::PERSONAS.iter().map(|(value, label)| html! {
                <option value={*value} selected={selected == *value}>{ *label }</option>
            }) }
        </>
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    TrendingUp,
    CreditCard,
    Target,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub value: String,
    pub icon: StatIcon,
    #[prop_or_default]
    pub tone: Option<Tone>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let value_class = props
        .tone
        .map(Tone::text_class)
        .unwrap_or("text-[#1D617A]");

    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class={classes!("text-2xl", "font-bold", "tracking-tight", value_class)}>{ props.value.clone() }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::TrendingUp => crate::icon_trending_up(),
                        StatIcon::CreditCard => crate::icon_credit_card(),
                        StatIcon::Target => crate::icon_target(),
                    }
                }
            </div>
        </div>
    }
}

pub fn textarea_class() -> &'static str {
    "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground font-mono text-sm focus:outline-none focus:ring-2 focus:ring-primary"
}
