use yew::prelude::*;

use super::{
    bullet_list, client_from, page_shell, result_card, section, textarea_class, StatCard,
    StatIcon, CURRENCY_SYMBOL,
};
use crate::charts::PieChart;
use crate::config::ClientConfig;
use crate::format::{format_currency, format_percent, Tone};
use crate::models::{BudgetRequest, BudgetSummary};
use crate::panel::{
    fail_panel, parse_field, render_panel, run_panel, FlowError, PanelState, RequestTracker,
};

const SAMPLE_INCOME: &str = r#"{
  "Salary": 5000,
  "Freelance": 500,
  "Investments": 200
}"#;

const SAMPLE_EXPENSES: &str = r#"{
  "Rent": 1200,
  "Groceries": 400,
  "Transportation": 200,
  "Entertainment": 150,
  "Utilities": 100
}"#;

/// Both fields must parse before anything is sent.
pub fn budget_request(income: &str, expenses: &str) -> Result<BudgetRequest, FlowError> {
    Ok(BudgetRequest {
        income: parse_field(income)?,
        expenses: parse_field(expenses)?,
    })
}

#[function_component(BudgetPage)]
pub fn budget_page() -> Html {
    let api = client_from(use_context::<ClientConfig>());
    let income = use_state(String::new);
    let expenses = use_state(String::new);
    let result = use_state(|| PanelState::<BudgetSummary>::Idle);
    let tracker = use_state(RequestTracker::default);

    let on_submit = {
        let income = income.clone();
        let expenses = expenses.clone();
        let result = result.clone();
        let tracker = tracker.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match budget_request(&income, &expenses) {
                Err(err) => fail_panel(&result, &tracker, err),
                Ok(req) => {
                    log::debug!("budget: requesting summary");
                    let api = api.clone();
                    run_panel("budget", result.clone(), (*tracker).clone(), async move {
                        api.budget_summary(&req).await.map_err(FlowError::from)
                    });
                }
            }
        })
    };

    let on_sample = {
        let income = income.clone();
        let expenses = expenses.clone();
        Callback::from(move |_: MouseEvent| {
            income.set(SAMPLE_INCOME.to_string());
            expenses.set(SAMPLE_EXPENSES.to_string());
        })
    };

    html! {
        { page_shell(
            "Budget Summary",
            html! {
                <button type="button" onclick={on_sample} class="text-sm font-semibold text-primary">{"Load sample"}</button>
            },
            html! {
                <>
                    <form class="bg-card rounded-[10px] p-6 border border-border space-y-4" onsubmit={on_submit}>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                            <div class="space-y-1">
                                <label class="text-sm font-medium text-foreground">{"Income (JSON)"}</label>
                                <textarea rows="8" class={textarea_class()} placeholder={r#"{"Salary": 5000}"#}
                                    value={(*income).clone()}
                                    oninput={{
                                        let income = income.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                            income.set(input.value());
                                        })
                                    }} />
                            </div>
                            <div class="space-y-1">
                                <label class="text-sm font-medium text-foreground">{"Expenses (JSON)"}</label>
                                <textarea rows="8" class={textarea_class()} placeholder={r#"{"Rent": 1200}"#}
                                    value={(*expenses).clone()}
                                    oninput={{
                                        let expenses = expenses.clone();
                                        Callback::from(move |e: InputEvent| {
                                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                            expenses.set(input.value());
                                        })
                                    }} />
                            </div>
                        </div>
                        <button type="submit" class="bg-primary text-primary-foreground px-4 py-2 rounded-lg font-semibold"
                            disabled={*result == PanelState::Loading}>
                            {"Generate Summary"}
                        </button>
                    </form>

                    { render_panel(&*result, |summary| html! { <BudgetSummaryView summary={summary.clone()} /> }) }
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
pub struct BudgetSummaryViewProps {
    pub summary: BudgetSummary,
}

#[function_component(BudgetSummaryView)]
pub fn budget_summary_view(props: &BudgetSummaryViewProps) -> Html {
    let summary = &props.summary;

    result_card(
        "Budget Summary",
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <StatCard title="TOTAL INCOME"
                        value={format_currency(summary.total_income, CURRENCY_SYMBOL)}
                        icon={StatIcon::TrendingUp} />
                    <StatCard title="TOTAL EXPENSES"
                        value={format_currency(summary.total_expenses, CURRENCY_SYMBOL)}
                        icon={StatIcon::CreditCard} />
                    <StatCard title="SAVINGS RATE"
                        value={format_percent(summary.savings_rate)}
                        icon={StatIcon::Target}
                        tone={Some(Tone::for_savings_rate(summary.savings_rate))} />
                </div>
                { section("Category Breakdown", html! { <PieChart shares={summary.category_percentages.clone()} /> }) }
                { section("Suggestions", bullet_list(&summary.suggestion_list, "border-[#4f46e5]")) }
            </>
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_fields_become_one_request_body() {
        let req = budget_request(SAMPLE_INCOME, SAMPLE_EXPENSES).unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["income"], json!({"Salary": 5000, "Freelance": 500, "Investments": 200}));
        assert_eq!(body["expenses"]["Rent"], 1200);
        assert_eq!(body.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn malformed_income_builds_no_request() {
        let err = budget_request("{Salary: 5000}", SAMPLE_EXPENSES).unwrap_err();
        assert!(matches!(err, FlowError::Input(_)));
    }

    #[test]
    fn malformed_expenses_builds_no_request() {
        assert!(budget_request(SAMPLE_INCOME, "").is_err());
        assert!(budget_request(SAMPLE_INCOME, "[1, 2").is_err());
    }

    #[test]
    fn payloads_are_passed_through_untouched() {
        let req = budget_request(r#"[{"source": "job", "amount": 10}]"#, "42").unwrap();
        assert_eq!(req.income, json!([{"source": "job", "amount": 10}]));
        assert_eq!(req.expenses, json!(42));
    }
}
