// File: crates/hubchart-core/src/theme.rs
// Summary: Figure/axes colors resolved from plugin preferences and per-chart transparency flags.

use crate::payload::ChartJob;
use crate::record::LogRecord;
use crate::style::{fix_rgb, Rgb};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Figure background; `None` is transparent.
    pub background: Option<Rgb>,
    /// Axes face drawn under everything; `None` leaves the plot area see-through.
    pub face: Option<Rgb>,
    /// Face color to lay down as a lowest-zorder patch on transparent charts.
    pub fill_patch: Option<Rgb>,
    pub spine: Rgb,
    pub font: Rgb,
}

impl Theme {
    pub fn from_job(job: &ChartJob, log: &mut LogRecord) -> Self {
        let mut color = |text: &str, fallback: Rgb, what: &str| match fix_rgb(text) {
            Ok(c) => c,
            Err(e) => {
                log.warning(format!("Invalid {what} preference: {e}. Using default."));
                fallback
            }
        };
        let background = color(&job.prefs.background_color, Rgb::BLACK, "background color");
        let face = color(&job.prefs.face_color, Rgb::BLACK, "face color");
        let spine = color(&job.prefs.spine_color, Rgb::grey(0.53), "spine color");
        let font = color(&job.prefs.font_color, Rgb::WHITE, "font color");

        let transparent = job.p_dict.flag("transparent_charts");
        let filled = job.p_dict.flag("transparent_filled");
        Self {
            background: (!transparent).then_some(background),
            face: (!transparent).then_some(face),
            fill_patch: (transparent && filled).then_some(face),
            spine,
            font,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ChartVariant;
    use crate::prefs::PluginPrefs;
    use crate::style::StyleBundles;

    fn job() -> ChartJob {
        let prefs = PluginPrefs::default();
        let k = StyleBundles::from_prefs(&prefs).unwrap();
        ChartJob::new(ChartVariant::Line, "t", prefs, k)
    }

    #[test]
    fn opaque_by_default() {
        let mut log = LogRecord::new();
        let t = Theme::from_job(&job(), &mut log);
        assert_eq!(t.background, Some(Rgb::BLACK));
        assert_eq!(t.fill_patch, None);
        assert!(log.is_clean());
    }

    #[test]
    fn transparent_filled_uses_patch() {
        let mut j = job();
        j.p_dict.insert("transparent_charts", true);
        j.p_dict.insert("transparent_filled", true);
        let mut log = LogRecord::new();
        let t = Theme::from_job(&j, &mut log);
        assert_eq!(t.background, None);
        assert_eq!(t.face, None);
        assert_eq!(t.fill_patch, Some(Rgb::BLACK));
    }

    #[test]
    fn bad_pref_color_falls_back_with_warning() {
        let mut j = job();
        j.prefs.spine_color = "#123456".into();
        let mut log = LogRecord::new();
        let t = Theme::from_job(&j, &mut log);
        assert_eq!(t.spine, Rgb::grey(0.53));
        assert_eq!(log.warning.len(), 1);
    }
}
