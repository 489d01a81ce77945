use crate::domain::CurrencyCode;

/// One inbound message, parsed.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Start,
    Help,
    Convert {
        amount: f64,
        from: CurrencyCode,
        to: CurrencyCode,
    },
    Graph {
        from: CurrencyCode,
        to: CurrencyCode,
    },
    Rates {
        base: CurrencyCode,
    },
    Favorite {
        from: CurrencyCode,
        to: CurrencyCode,
    },
    MyFavorite,
    /// A keyboard shortcut press: plain text matching the configured
    /// currency set. Answered with a prompt, no network.
    CurrencyChosen(CurrencyCode),
    /// Recognized keyword, wrong shape.
    Usage(UsageHint),
    Unrecognized {
        raw: String,
    },
}

/// Which command's usage example to show back to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageHint {
    Convert,
    Graph,
    Rates,
    Favorite,
}

impl UsageHint {
    pub fn example(self) -> &'static str {
        match self {
            UsageHint::Convert => "/convert 100 USD to EUR",
            UsageHint::Graph => "/graph USD EUR",
            UsageHint::Rates => "/rates USD",
            UsageHint::Favorite => "/favorite USD EUR",
        }
    }
}

impl Command {
    /// Parse one inbound message.
    ///
    /// Total and pure: malformed input maps to `Usage` (recognized keyword,
    /// wrong shape) or `Unrecognized`, never an error. `quick_picks` is the
    /// configured currency-shortcut set shown on the /start keyboard.
    pub fn parse(raw: &str, quick_picks: &[String]) -> Command {
        let text = raw.trim();
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let Some(&first) = tokens.first() else {
            return Command::Unrecognized {
                raw: text.to_string(),
            };
        };

        if let Some(keyword) = command_keyword(first) {
            return match keyword.as_str() {
                "start" if tokens.len() == 1 => Command::Start,
                "help" if tokens.len() == 1 => Command::Help,
                "myfavorite" if tokens.len() == 1 => Command::MyFavorite,
                "convert" => parse_convert(&tokens),
                "graph" => match parse_pair(&tokens) {
                    Some((from, to)) => Command::Graph { from, to },
                    None => Command::Usage(UsageHint::Graph),
                },
                "favorite" => match parse_pair(&tokens) {
                    Some((from, to)) => Command::Favorite { from, to },
                    None => Command::Usage(UsageHint::Favorite),
                },
                "rates" => match parse_base(&tokens) {
                    Some(base) => Command::Rates { base },
                    None => Command::Usage(UsageHint::Rates),
                },
                _ => Command::Unrecognized {
                    raw: text.to_string(),
                },
            };
        }

        if tokens.len() == 1 && quick_picks.iter().any(|c| c.eq_ignore_ascii_case(first)) {
            if let Some(code) = CurrencyCode::parse(first) {
                return Command::CurrencyChosen(code);
            }
        }

        Command::Unrecognized {
            raw: text.to_string(),
        }
    }
}

/// Telegram may send `/cmd@botname arg ...`; strip the prefix and suffix.
fn command_keyword(first: &str) -> Option<String> {
    let rest = first.strip_prefix('/')?;
    let keyword = rest.split('@').next().unwrap_or("").to_ascii_lowercase();
    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}

/// `/convert <amount> <from> to <to>`: exactly 5 tokens, token 3 literally
/// "to", amount a positive finite float.
fn parse_convert(tokens: &[&str]) -> Command {
    if tokens.len() != 5 || tokens[3] != "to" {
        return Command::Usage(UsageHint::Convert);
    }
    let amount = match tokens[1].parse::<f64>() {
        Ok(a) if a.is_finite() && a > 0.0 => a,
        _ => return Command::Usage(UsageHint::Convert),
    };
    match (CurrencyCode::parse(tokens[2]), CurrencyCode::parse(tokens[4])) {
        (Some(from), Some(to)) => Command::Convert { amount, from, to },
        _ => Command::Usage(UsageHint::Convert),
    }
}

fn parse_pair(tokens: &[&str]) -> Option<(CurrencyCode, CurrencyCode)> {
    if tokens.len() != 3 {
        return None;
    }
    Some((
        CurrencyCode::parse(tokens[1])?,
        CurrencyCode::parse(tokens[2])?,
    ))
}

fn parse_base(tokens: &[&str]) -> Option<CurrencyCode> {
    if tokens.len() != 2 {
        return None;
    }
    CurrencyCode::parse(tokens[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picks() -> Vec<String> {
        ["USD", "EUR", "GBP", "JPY", "UAH", "CNY"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn parses_well_formed_convert() {
        assert_eq!(
            Command::parse("/convert 100 USD to EUR", &picks()),
            Command::Convert {
                amount: 100.0,
                from: code("USD"),
                to: code("EUR"),
            }
        );
    }

    #[test]
    fn convert_accepts_lowercase_codes() {
        assert_eq!(
            Command::parse("/convert 2.5 usd to eur", &picks()),
            Command::Convert {
                amount: 2.5,
                from: code("USD"),
                to: code("EUR"),
            }
        );
    }

    #[test]
    fn malformed_convert_yields_usage() {
        for raw in [
            "/convert 100 USD EUR",          // missing "to"
            "/convert 100 USD into EUR",     // wrong literal
            "/convert abc USD to EUR",       // non-numeric amount
            "/convert -5 USD to EUR",        // non-positive amount
            "/convert 0 USD to EUR",         // non-positive amount
            "/convert inf USD to EUR",       // non-finite amount
            "/convert 100 USD to EUR extra", // wrong token count
            "/convert 100 US1 to EUR",       // bad currency token
            "/convert",
        ] {
            assert_eq!(
                Command::parse(raw, &picks()),
                Command::Usage(UsageHint::Convert),
                "input: {raw}"
            );
        }
    }

    #[test]
    fn parses_graph_rates_favorite() {
        assert_eq!(
            Command::parse("/graph USD EUR", &picks()),
            Command::Graph {
                from: code("USD"),
                to: code("EUR"),
            }
        );
        assert_eq!(
            Command::parse("/rates USD", &picks()),
            Command::Rates { base: code("USD") }
        );
        assert_eq!(
            Command::parse("/favorite USD EUR", &picks()),
            Command::Favorite {
                from: code("USD"),
                to: code("EUR"),
            }
        );
    }

    #[test]
    fn wrong_arity_yields_command_specific_usage() {
        assert_eq!(
            Command::parse("/graph USD", &picks()),
            Command::Usage(UsageHint::Graph)
        );
        assert_eq!(
            Command::parse("/rates", &picks()),
            Command::Usage(UsageHint::Rates)
        );
        assert_eq!(
            Command::parse("/favorite USD", &picks()),
            Command::Usage(UsageHint::Favorite)
        );
    }

    #[test]
    fn zero_argument_commands_are_exact_match() {
        assert_eq!(Command::parse("/start", &picks()), Command::Start);
        assert_eq!(Command::parse("/help", &picks()), Command::Help);
        assert_eq!(Command::parse("/myfavorite", &picks()), Command::MyFavorite);
        assert!(matches!(
            Command::parse("/start now", &picks()),
            Command::Unrecognized { .. }
        ));
    }

    #[test]
    fn strips_botname_suffix() {
        assert_eq!(Command::parse("/help@fx_bot", &picks()), Command::Help);
    }

    #[test]
    fn quick_pick_text_is_a_currency_hint() {
        assert_eq!(
            Command::parse("USD", &picks()),
            Command::CurrencyChosen(code("USD"))
        );
        // Not in the configured set -> not a hint.
        assert!(matches!(
            Command::parse("CHF", &picks()),
            Command::Unrecognized { .. }
        ));
    }

    #[test]
    fn unknown_input_is_unrecognized() {
        assert!(matches!(
            Command::parse("/frobnicate", &picks()),
            Command::Unrecognized { .. }
        ));
        assert!(matches!(
            Command::parse("hello there", &picks()),
            Command::Unrecognized { .. }
        ));
        assert!(matches!(
            Command::parse("   ", &picks()),
            Command::Unrecognized { .. }
        ));
    }
}
