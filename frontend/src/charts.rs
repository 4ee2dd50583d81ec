use std::f64::consts::PI;

use yew::prelude::*;

use crate::format::{format_currency, format_percent};
use crate::models::CategorySpend;

pub const PALETTE: [&str; 8] = [
    "#4f46e5", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#ec4899", "#6366f1",
];

const CENTER: f64 = 100.0;
const RADIUS: f64 = 90.0;

#[derive(Clone, Debug, PartialEq)]
pub enum SliceShape {
    Full,
    Arc(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
    pub shape: SliceShape,
}

fn point_at(angle: f64) -> (f64, f64) {
    (CENTER + RADIUS * angle.cos(), CENTER + RADIUS * angle.sin())
}

/// Slices start at twelve o'clock and run clockwise. Non-positive shares are
/// left out of the chart.
pub fn pie_slices(shares: &[(String, f64)]) -> Vec<PieSlice> {
    let total: f64 = shares.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = -PI / 2.0;
    let mut slices = Vec::new();
    for (i, (label, value)) in shares.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let sweep = value / total * 2.0 * PI;
        let shape = if sweep >= 2.0 * PI - 1e-9 {
            SliceShape::Full
        } else {
            let (x1, y1) = point_at(angle);
            let (x2, y2) = point_at(angle + sweep);
            let large = if sweep > PI { 1 } else { 0 };
            SliceShape::Arc(format!(
                "M {CENTER} {CENTER} L {x1:.3} {y1:.3} A {RADIUS} {RADIUS} 0 {large} 1 {x2:.3} {y2:.3} Z"
            ))
        };
        angle += sweep;
        slices.push(PieSlice {
            label: label.clone(),
            value: *value,
            color: PALETTE[i % PALETTE.len()],
            shape,
        });
    }
    slices
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub amount: f64,
    pub share: Option<f64>,
    pub height: f64,
}

/// Heights are percentages of the tallest bar.
pub fn bars(categories: &[CategorySpend]) -> Vec<Bar> {
    let max = categories.iter().map(|c| c.amount).fold(0.0_f64, f64::max);
    categories
        .iter()
        .map(|c| Bar {
            label: c.category.clone(),
            amount: c.amount,
            share: c.percentage,
            height: if max > 0.0 {
                (c.amount.max(0.0) / max * 100.0).min(100.0)
            } else {
                0.0
            },
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct PieChartProps {
    pub shares: Vec<(String, f64)>,
}

#[function_component(PieChart)]
pub fn pie_chart(props: &PieChartProps) -> Html {
    let slices = pie_slices(&props.shares);
    if slices.is_empty() {
        return html! { <p class="text-sm text-muted-foreground">{"No categories to chart."}</p> };
    }

    html! {
        <div class="flex flex-col items-center gap-4">
            <svg width="220" height="220" viewBox="0 0 200 200">
                { for slices.iter().map(|slice| match &slice.shape {
                    SliceShape::Full => html! {
                        <circle cx="100" cy="100" r="90" fill={slice.color}>
                            <title>{ format!("{}: {}", slice.label, format_percent(slice.value)) }</title>
                        </circle>
                    },
                    SliceShape::Arc(d) => html! {
                        <path d={d.clone()} fill={slice.color} stroke="#ffffff" stroke-width="1">
                            <title>{ format!("{}: {}", slice.label, format_percent(slice.value)) }</title>
                        </path>
                    },
                }) }
            </svg>
            <ul class="flex flex-wrap justify-center gap-x-4 gap-y-1">
                { for slices.iter().map(|slice| html! {
                    <li class="flex items-center gap-2 text-xs text-muted-foreground">
                        <span class="inline-block w-3 h-3 rounded-sm" style={format!("background:{}", slice.color)}></span>
                        { format!("{}: {}", slice.label, format_percent(slice.value)) }
                    </li>
                }) }
            </ul>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BarChartProps {
    pub categories: Vec<CategorySpend>,
    pub currency_symbol: String,
}

#[function_component(BarChart)]
pub fn bar_chart(props: &BarChartProps) -> Html {
    let bars = bars(&props.categories);

    html! {
        <div class="flex items-end gap-4 h-56 pt-6 border-b border-border">
            { for bars.iter().map(|bar| html! {
                <div class="flex-1 flex flex-col items-center justify-end h-full">
                    <span class="text-[10px] font-bold text-[#173E63] mb-1">
                        { format_currency(bar.amount, &props.currency_symbol) }
                    </span>
                    <div class="w-full max-w-[48px] bg-[#4f46e5] rounded-t-md"
                        style={format!("height: {:.1}%", bar.height)}></div>
                    <span class="text-xs text-muted-foreground mt-2 text-center truncate w-full">{ bar.label.clone() }</span>
                    {
                        if let Some(share) = bar.share {
                            html! { <span class="text-[10px] text-slate-400">{ format_percent(share) }</span> }
                        } else {
                            html! {}
                        }
                    }
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(items: &[(&str, f64)]) -> Vec<(String, f64)> {
        items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn single_category_is_a_full_circle() {
        let slices = pie_slices(&shares(&[("Rent", 100.0)]));
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].shape, SliceShape::Full);
    }

    #[test]
    fn slices_follow_input_order_and_palette() {
        let slices = pie_slices(&shares(&[("Rent", 60.0), ("Food", 30.0), ("Fun", 10.0)]));
        let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Rent", "Food", "Fun"]);
        assert_eq!(slices[1].color, PALETTE[1]);
        match &slices[0].shape {
            // 60% sweeps more than half the circle
            SliceShape::Arc(d) => assert!(d.contains(" 0 1 1 ")),
            SliceShape::Full => panic!("expected an arc"),
        }
        match &slices[2].shape {
            SliceShape::Arc(d) => assert!(d.contains(" 0 0 1 ")),
            SliceShape::Full => panic!("expected an arc"),
        }
    }

    #[test]
    fn first_slice_starts_at_top() {
        let slices = pie_slices(&shares(&[("A", 1.0), ("B", 1.0)]));
        match &slices[0].shape {
            SliceShape::Arc(d) => assert!(d.starts_with("M 100 100 L 100.000 10.000")),
            SliceShape::Full => panic!("expected an arc"),
        }
    }

    #[test]
    fn empty_or_zero_shares_draw_nothing() {
        assert!(pie_slices(&[]).is_empty());
        assert!(pie_slices(&shares(&[("Rent", 0.0)])).is_empty());
        assert_eq!(pie_slices(&shares(&[("Rent", 0.0), ("Food", 5.0)])).len(), 1);
    }

    #[test]
    fn bars_scale_to_the_largest_amount() {
        let categories = vec![
            CategorySpend {
                category: "Food".into(),
                amount: 450.0,
                percentage: Some(60.0),
            },
            CategorySpend {
                category: "Transport".into(),
                amount: 225.0,
                percentage: None,
            },
        ];
        let bars = bars(&categories);
        assert_eq!(bars[0].height, 100.0);
        assert_eq!(bars[1].height, 50.0);
        assert_eq!(bars[0].share, Some(60.0));
    }

    #[test]
    fn zero_amounts_have_no_height() {
        let bars = bars(&[CategorySpend {
            category: "Misc".into(),
            amount: 0.0,
            percentage: None,
        }]);
        assert_eq!(bars[0].height, 0.0);
    }
}
