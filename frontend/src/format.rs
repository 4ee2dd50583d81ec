#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Favorable,
    Cautionary,
    Unfavorable,
}

impl Tone {
    pub fn for_savings_rate(rate: f64) -> Self {
        if rate >= 20.0 {
            Tone::Favorable
        } else if rate >= 10.0 {
            Tone::Cautionary
        } else {
            Tone::Unfavorable
        }
    }

    pub fn for_sentiment(sentiment: &str) -> Self {
        match sentiment.trim().to_ascii_lowercase().as_str() {
            "positive" => Tone::Favorable,
            "negative" => Tone::Unfavorable,
            _ => Tone::Cautionary,
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Tone::Favorable => "text-emerald-600",
            Tone::Cautionary => "text-amber-500",
            Tone::Unfavorable => "text-red-500",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Tone::Favorable => "bg-emerald-100 text-emerald-700",
            Tone::Cautionary => "bg-amber-100 text-amber-700",
            Tone::Unfavorable => "bg-red-100 text-red-700",
        }
    }
}

pub fn format_with_commas(value: i64) -> String {
    let is_negative = value < 0;
    let s = value.abs().to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    let formatted: String = out.into_iter().rev().collect();
    if is_negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        format_with_commas(cents / 100),
        cents % 100
    )
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
