// File: crates/hubchart-core/src/renderers/multiline.rs
// Summary: Free-form text chart: optional cleanup, word wrap, one centered text block.

use anyhow::Result;

use crate::artist::{Artist, Coords, TextArtist};
use crate::figure::Axes;
use crate::formatters::new_figure;
use crate::job::{JobContext, JobOutcome, Scratch};
use crate::payload::{ChartJob, JobData};
use crate::style::FontSpec;
use crate::theme::Theme;
use crate::types::Frame;

const SUBSTITUTIONS: [(&str, &str); 7] = [
    (" am ", " AM "),
    (" pm ", " PM "),
    ("*", " "),
    ("\n", " "),
    ("...", " "),
    ("/ ", "/"),
    (" /", "/"),
];

/// Normalize punctuation and whitespace in host-supplied text.
pub fn clean_text(text: &str) -> String {
    let mut s = text.to_string();
    for (from, to) in SUBSTITUTIONS {
        s = s.replace(from, to);
    }
    s = s.replace('/', " / ");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap at `width` characters; longer words get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let p = &job.p_dict;
    let raw = match &job.data {
        Some(JobData::Text(t)) => t.clone(),
        _ => {
            ctx.log.warning(format!("No text for '{}'. Drawing an empty chart.", job.name));
            String::new()
        }
    };
    let text = if p.flag("cleanTheText") { clean_text(&raw) } else { raw };
    let width = p.number("numberOfCharacters").filter(|n| *n >= 1.0).map_or(40, |n| n as usize);
    let lines = wrap(&text, width);

    let theme = Theme::from_job(job, &mut ctx.log);
    let mut figure = new_figure(job, &theme, ctx.draw_labels);
    let mut ax = Axes::new(Frame::new(0.01, 0.01, 0.99, 0.99));
    ax.face = theme.face;
    ax.x.visible = false;
    ax.y.visible = false;
    if p.flag("textAreaBorder") {
        ax.spine = Some(theme.spine);
    }

    let font = FontSpec {
        family: job.prefs.font_main.clone(),
        size: p.number("multilineFontSize").filter(|s| *s > 0.0).map_or(job.prefs.main_font_size, |s| s as f32),
        color: p.color_or("textColor", theme.font),
    };
    ax.add(Artist::Text(TextArtist::new(lines.join("\n"), (0.5, 0.5), Coords::Axes, font)), 1.0);
    ctx.log.threaddebug(format!("Multiline text wrapped to {} lines.", lines.len()));

    figure.add_axes(ax);
    Ok(Some(JobOutcome { figure, scratch: Scratch::default() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_host_text() {
        assert_eq!(clean_text("Sunny *today* at 3 pm ... north/ east"), "Sunny today at 3 PM north / east");
        assert_eq!(clean_text("a\nb"), "a b");
    }

    #[test]
    fn wraps_at_width() {
        assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("extraordinarily long", 5), vec!["extraordinarily", "long"]);
        assert_eq!(wrap("", 5), vec![""]);
    }
}
