use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "flex flex-col items-center px-2 lg:px-6 lg:py-8 \
    mx-auto max-w-screen-xl text-gray-900 dark:text-white";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Spendlog" }
                script src="https://cdn.tailwindcss.com" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

/// numfmt switches to scientific notation from here on.
const GROUPED_DOLLARS_LIMIT: u64 = 1_000_000_000_000;

/// Format `number` as dollars and cents, e.g. `-$1,234.50`.
///
/// Amounts of a trillion dollars or more are written without thousands
/// separators.
pub fn format_currency(number: f64) -> String {
    static DOLLAR_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let dollar_fmt = DOLLAR_FMT.get_or_init(|| {
        Formatter::currency("")
            .map(|formatter| formatter.precision(Precision::Decimals(0)))
            .ok()
    });

    let total_cents = (number.abs() * 100.0).round();
    let sign = if number < 0.0 && total_cents > 0.0 {
        "-"
    } else {
        ""
    };

    // Past the range of u64 an f64 has no cents left to show.
    if total_cents >= u64::MAX as f64 {
        return format!("{sign}${:.0}.00", number.abs());
    }

    let total_cents = total_cents as u64;
    let (dollars, cents) = (total_cents / 100, total_cents % 100);

    // numfmt renders zero as "0" regardless of precision, and only the whole
    // dollars go through it so that cents never lose their trailing zero.
    let dollars = match dollar_fmt {
        Some(formatter) if dollars > 0 && dollars < GROUPED_DOLLARS_LIMIT => {
            formatter.fmt_string(dollars as f64)
        }
        _ => dollars.to_string(),
    };

    format!("{sign}${dollars}.{cents:02}")
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a
            href=(url)
            class="text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400 underline"
        {
          (text)
        }
    )
}
