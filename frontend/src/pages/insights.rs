use yew::prelude::*;

use super::{
    bullet_list, client_from, page_shell, result_card, section, textarea_class, CURRENCY_SYMBOL,
};
use crate::charts::BarChart;
use crate::config::ClientConfig;
use crate::models::{InsightsRequest, SpendingInsights};
use crate::panel::{
    fail_panel, parse_field, render_panel, run_panel, FlowError, PanelState, RequestTracker,
};

pub const NO_RED_FLAGS: &str = "No red flags detected. Great job!";

const SAMPLE_TRANSACTIONS: &str = r#"[
  {"category": "Food", "amount": 450.00, "date": "2024-01-15", "merchant": "Grocery Store", "description": "Monthly groceries"},
  {"category": "Food", "amount": 85.00, "date": "2024-01-18", "merchant": "Restaurant"},
  {"category": "Entertainment", "amount": 120.00, "date": "2024-01-20", "merchant": "Concert Venue"},
  {"category": "Transportation", "amount": 200.00, "date": "2024-01-10", "merchant": "Gas Station"}
]"#;

#[derive(Debug, PartialEq)]
pub enum RedFlags<'a> {
    AllClear,
    Listed(&'a [String]),
}

pub fn red_flags(flags: &[String]) -> RedFlags<'_> {
    if flags.is_empty() {
        RedFlags::AllClear
    } else {
        RedFlags::Listed(flags)
    }
}

pub fn insights_request(transactions: &str) -> Result<InsightsRequest, FlowError> {
    Ok(InsightsRequest {
        transactions: parse_field(transactions)?,
    })
}

#[function_component(InsightsPage)]
pub fn insights_page() -> Html {
    let api = client_from(use_context::<ClientConfig>());
    let transactions = use_state(String::new);
    let result = use_state(|| PanelState::<SpendingInsights>::Idle);
    let tracker = use_state(RequestTracker::default);

    let on_submit = {
        let transactions = transactions.clone();
        let result = result.clone();
        let tracker = tracker.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match insights_request(&transactions) {
                Err(err) => fail_panel(&result, &tracker, err),
                Ok(req) => {
                    log::debug!("insights: requesting spending insights");
                    let api = api.clone();
                    run_panel("insights", result.clone(), (*tracker).clone(), async move {
                        api.spending_insights(&req).await.map_err(FlowError::from)
                    });
                }
            }
        })
    };

    let on_sample = {
        let transactions = transactions.clone();
        Callback::from(move |_: MouseEvent| transactions.set(SAMPLE_TRANSACTIONS.to_string()))
    };

    html! {
        { page_shell(
            "Spending Insights",
            html! {
                <button type="button" onclick={on_sample} class="text-sm font-semibold text-primary">{"Load sample"}</button>
            },
            html! {
                <>
                    <form class="bg-card rounded-[10px] p-6 border border-border space-y-4" onsubmit={on_submit}>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Transactions (JSON array)"}</label>
                            <textarea rows="10" class={textarea_class()}
                                placeholder={r#"[{"category": "Food", "amount": 45.5, "date": "2024-01-15"}]"#}
                                value={(*transactions).clone()}
                                oninput={{
                                    let transactions = transactions.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                        transactions.set(input.value());
                                    })
                                }} />
                        </div>
                        <button type="submit" class="bg-primary text-primary-foreground px-4 py-2 rounded-lg font-semibold"
                            disabled={*result == PanelState::Loading}>
                            {"Analyze Spending"}
                        </button>
                    </form>

                    { render_panel(&*result, |insights| html! { <InsightsView insights={insights.clone()} /> }) }
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
pub struct InsightsViewProps {
    pub insights: SpendingInsights,
}

#[function_component(InsightsView)]
pub fn insights_view(props: &InsightsViewProps) -> Html {
    let insights = &props.insights;

    let chart = match insights.chartable_categories() {
        Some(categories) => section(
            "Top Spending Categories",
            html! { <BarChart categories={categories.to_vec()} currency_symbol={CURRENCY_SYMBOL.to_string()} /> },
        ),
        None => html! {},
    };

    let flags = match red_flags(&insights.red_flags) {
        RedFlags::AllClear => html! { <p class="text-sm text-emerald-600">{ NO_RED_FLAGS }</p> },
        RedFlags::Listed(flags) => bullet_list(flags, "border-red-400"),
    };

    result_card(
        "Spending Insights",
        html! {
            <>
                { chart }
                { section("Red Flags", flags) }
                { section("Recommendations", bullet_list(&insights.recommendations, "border-emerald-400")) }
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_transactions_parse_as_an_array() {
        let req = insights_request(SAMPLE_TRANSACTIONS).unwrap();
        assert_eq!(req.transactions.as_array().map(|a| a.len()), Some(4));
        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("transactions").is_some());
    }

    #[test]
    fn empty_red_flags_are_all_clear() {
        assert_eq!(red_flags(&[]), RedFlags::AllClear);

        let one = vec!["Overspending on dining".to_string()];
        assert_eq!(red_flags(&one), RedFlags::Listed(&one[..]));
    }

    #[test]
    fn malformed_transactions_build_no_request() {
        let err = insights_request(r#"[{"category": "Food",]"#).unwrap_err();
        assert!(matches!(err, FlowError::Input(_)));
    }
}
