// Renderers for the results views: bars in the terminal, and a JSON summary.

use std::io::Write;

use crate::results::*;

pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Draws horizontal bars with plain characters.
pub struct TextRenderer<W: Write> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, bar_width: usize) -> TextRenderer<W> {
        TextRenderer { out, bar_width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // The number of filled cells for a percentage, never wider than the full bar.
    fn filled_cells(&self, percentage_tenths: u64) -> usize {
        let tenths = percentage_tenths.min(1000) as usize;
        (tenths * self.bar_width + 500) / 1000
    }
}

impl<W: Write> Render for TextRenderer<W> {
    type Error = ResultsError;

    fn render(&mut self, view: &ResultsView) -> ResultsResult<()> {
        writeln!(self.out, "{}", view.title).context(WritingOutputSnafu {})?;
        match &view.presentation {
            Presentation::Bars {
                formatted_total,
                entries,
                ..
            } => {
                writeln!(self.out, "Total Votes: {}", formatted_total)
                    .context(WritingOutputSnafu {})?;
                let label_width = entries
                    .iter()
                    .map(|e| e.label().chars().count())
                    .max()
                    .unwrap_or(0);
                for e in entries.iter() {
                    let filled = self.filled_cells(e.percentage_tenths);
                    writeln!(
                        self.out,
                        "  {:<lw$} |{}{}| {}",
                        e.label(),
                        "█".repeat(filled),
                        " ".repeat(self.bar_width - filled),
                        e.bar_text(),
                        lw = label_width
                    )
                    .context(WritingOutputSnafu {})?;
                }
            }
            p => {
                let msg = p.placeholder().unwrap_or_default();
                writeln!(self.out, "  {}", msg).context(WritingOutputSnafu {})?;
            }
        }
        writeln!(self.out).context(WritingOutputSnafu {})?;
        Ok(())
    }
}

/// Collects the views in a JSON summary.
#[derive(Default)]
pub struct JsonSummary {
    views: Vec<JSValue>,
}

impl JsonSummary {
    pub fn to_json(&self) -> JSValue {
        json!({ "views": self.views })
    }
}

impl Render for JsonSummary {
    type Error = ResultsError;

    fn render(&mut self, view: &ResultsView) -> ResultsResult<()> {
        self.views.push(view_to_json(view));
        Ok(())
    }
}

fn view_to_json(view: &ResultsView) -> JSValue {
    match &view.presentation {
        Presentation::Bars {
            total,
            entries,
            missing,
            ..
        } => {
            let results: Vec<JSValue> = entries
                .iter()
                .map(|e| {
                    json!({
                        "candidate": e.key.as_str(),
                        "name": e.display_name,
                        "party": e.party,
                        "class": e.class,
                        "votes": e.votes,
                        "percentage": e.percentage_label(),
                        "tooltip": e.tooltip(),
                    })
                })
                .collect();
            let mut js = json!({
                "title": view.title,
                "status": "ok",
                "total": total,
                "results": results,
            });
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(|k| k.as_str()).collect();
                js["missing"] = json!(names);
            }
            js
        }
        Presentation::NoData => json!({
            "title": view.title,
            "status": "noData",
            "message": view.presentation.placeholder(),
        }),
        Presentation::NotFound { jurisdiction } => json!({
            "title": view.title,
            "status": "notFound",
            "jurisdiction": jurisdiction,
            "message": view.presentation.placeholder(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kent_view() -> ResultsView {
        let results = ElectionResults::from_csv(
            "jurisdiction,harris,trump,oliver,stein,kennedy,others,total\n\
             Kent,5251,5561,60,82,114,60,11128",
            DEFAULT_STATEWIDE_LABEL,
            CandidateTable::default(),
        );
        results.select(&Selection::County("Kent".to_string()))
    }

    fn render_text(view: &ResultsView, width: usize) -> String {
        let mut r = TextRenderer::new(Vec::new(), width);
        r.render(view).unwrap();
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn text_bars() {
        let out = render_text(&kent_view(), 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Kent County Results");
        assert_eq!(lines[1], "Total Votes: 11,128");
        assert_eq!(lines[2], "  Harris (D)  |█████     | 47.2% (5,251)");
        assert_eq!(lines[3], "  Trump (R)   |█████     | 50.0% (5,561)");
        assert_eq!(lines[7], "  Others      |          | 0.5% (60)");
    }

    #[test]
    fn text_placeholder() {
        let view = ResultsView {
            title: "County Results".to_string(),
            presentation: Presentation::NotFound {
                jurisdiction: "Atlantis".to_string(),
            },
        };
        let out = render_text(&view, 10);
        assert_eq!(out, "County Results\n  County data not found.\n\n");
    }

    #[test]
    fn bars_never_overflow() {
        let r = TextRenderer::new(Vec::new(), 40);
        assert_eq!(r.filled_cells(0), 0);
        assert_eq!(r.filled_cells(1000), 40);
        assert_eq!(r.filled_cells(1500), 40);
        assert_eq!(r.filled_cells(472), 19);
    }

    #[test]
    fn json_summary() {
        let mut summary = JsonSummary::default();
        summary.render(&kent_view()).unwrap();
        summary
            .render(&ResultsView {
                title: "Statewide Results".to_string(),
                presentation: Presentation::NoData,
            })
            .unwrap();
        let js = summary.to_json();
        let kent = &js["views"][0];
        assert_eq!(kent["title"], "Kent County Results");
        assert_eq!(kent["status"], "ok");
        assert_eq!(kent["total"], 11128);
        assert_eq!(kent["results"][0]["candidate"], "harris");
        assert_eq!(kent["results"][0]["percentage"], "47.2");
        assert_eq!(
            kent["results"][0]["tooltip"],
            "Harris (D): 5,251 votes (47.2%)"
        );
        assert_eq!(kent["results"][5]["party"], "");
        assert!(kent.get("missing").is_none());
        assert_eq!(js["views"][1]["status"], "noData");
    }
}
