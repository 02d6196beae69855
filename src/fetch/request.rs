/// Expand every `{symbol}` in the chart URL template. Other braces pass through untouched.
pub fn chart_url(template: &str, symbol: &str) -> String {
    template.replace("{symbol}", symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CHART_URL_TEMPLATE;

    #[test]
    fn substitutes_symbol() {
        let url = chart_url(DEFAULT_CHART_URL_TEMPLATE, "NVDA");
        assert_eq!(
            url,
            "https://charts2-node.finviz.com/chart.ashx?t=NVDA&tf=d&s=linear&ct=candle_stick&tm=d"
        );
    }

    #[test]
    fn substitutes_every_occurrence() {
        let url = chart_url("https://x.test/{symbol}/{symbol}.png", "AAPL");
        assert_eq!(url, "https://x.test/AAPL/AAPL.png");
    }

    #[test]
    fn leaves_other_braces_alone() {
        assert_eq!(
            chart_url("https://x.test/{symbol}?opts={dark}&q={", "MSFT"),
            "https://x.test/MSFT?opts={dark}&q={"
        );
    }
}
