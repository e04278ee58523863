use crate::{
    error::{EmberfarmError, EmberfarmResult},
    svg::num,
};

/// The single shared animation timeline, keyed by percentages of one cycle.
///
/// Every layer's keyframes (reveal mask, glow band, burn mask, dragon sweep)
/// are derived from this one record, so the reveal edge, glow, burn edge, and
/// dragon position cannot drift relative to one another across loop iterations.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Full cycle duration in seconds.
    pub cycle_secs: f64,
    /// Glow reaches full opacity here.
    pub glow_in: f64,
    /// Reveal rectangle reaches full grid width.
    pub reveal_end: f64,
    /// Burn rectangle starts moving (dragon becomes visible).
    pub burn_start: f64,
    /// Burn rectangle has fully traversed the grid; dragon at the right edge.
    pub burn_end: f64,
    /// Reveal and burn rectangles snap back to their start state.
    pub reset_start: f64,
    /// Dragon has fully left the canvas.
    pub exit_end: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            cycle_secs: 22.0,
            glow_in: 6.0,
            reveal_end: 60.0,
            burn_start: 60.0,
            burn_end: 88.0,
            reset_start: 89.0,
            exit_end: 96.0,
        }
    }
}

impl Timeline {
    pub fn validate(&self) -> EmberfarmResult<()> {
        if self.cycle_secs <= 0.0 {
            return Err(EmberfarmError::validation("cycle_secs must be > 0"));
        }
        if !(self.glow_in > 0.0 && self.glow_in < self.reveal_end) {
            return Err(EmberfarmError::validation(
                "glow_in must fall inside the reveal phase",
            ));
        }
        let ordered = 0.0 < self.reveal_end
            && self.reveal_end <= self.burn_start
            && self.burn_start < self.burn_end
            && self.burn_end < self.reset_start
            && self.reset_start <= 100.0;
        if !ordered {
            return Err(EmberfarmError::validation(
                "timeline breakpoints must satisfy 0 < reveal_end <= burn_start < burn_end < reset_start <= 100",
            ));
        }
        if !(self.burn_end < self.exit_end && self.exit_end < 100.0) {
            return Err(EmberfarmError::validation(
                "exit_end must fall between burn_end and 100",
            ));
        }
        Ok(())
    }

    /// Left-anchored reveal rectangle: width 0 -> grid width, then snap back.
    pub fn reveal_keyframes(&self, grid_width: f64) -> String {
        format!(
            "@keyframes reveal {{\n  0% {{ width: 0px; }}\n  {}% {{ width: {}px; }}\n  {}% {{ width: {}px; }}\n  {}% {{ width: 0px; }}\n  100% {{ width: 0px; }}\n}}",
            num(self.reveal_end),
            num(grid_width),
            num(self.burn_end),
            num(grid_width),
            num(self.reset_start),
        )
    }

    /// Glow band riding the reveal edge, carried off when the reveal completes.
    pub fn glow_keyframes(&self, travel: f64) -> String {
        format!(
            "@keyframes glow {{\n  0% {{ transform: translateX(0px); opacity: 0; }}\n  {}% {{ opacity: 0.45; }}\n  {}% {{ opacity: 0.45; }}\n  {}% {{ transform: translateX({}px); opacity: 0; }}\n  100% {{ transform: translateX({}px); opacity: 0; }}\n}}",
            num(self.glow_in),
            num(self.reveal_end - 2.0),
            num(self.reveal_end),
            num(travel),
            num(travel),
        )
    }

    /// Burn rectangle sweeping the grid left to right.
    pub fn burn_keyframes(&self, grid_width: f64) -> String {
        format!(
            "@keyframes burn {{\n  0%, {}% {{ transform: translateX(0px); }}\n  {}% {{ transform: translateX({}px); }}\n  100% {{ transform: translateX({}px); }}\n}}",
            num(self.burn_start),
            num(self.burn_end),
            num(grid_width),
            num(grid_width),
        )
    }

    /// Dragon sweep: one step ahead of the burn edge, exiting past the grid.
    pub fn dragon_keyframes(&self, grid_width: f64, exit: f64) -> String {
        format!(
            "@keyframes dragonSweep {{\n  0%, {}% {{ transform: translateX(0px); opacity: 0; }}\n  {}% {{ opacity: 1; }}\n  {}% {{ transform: translateX({}px); opacity: 1; }}\n  {}% {{ transform: translateX({}px); opacity: 0.7; }}\n  100% {{ transform: translateX({}px); opacity: 0; }}\n}}",
            num(self.burn_start),
            num(self.burn_start + 2.0),
            num(self.burn_end),
            num(grid_width),
            num(self.exit_end),
            num(exit),
            num(exit),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeline_validates() {
        Timeline::default().validate().unwrap();
    }

    #[test]
    fn out_of_order_breakpoints_are_rejected() {
        let mut t = Timeline::default();
        t.burn_end = 50.0;
        assert!(t.validate().is_err());

        let mut t = Timeline {
            reset_start: 80.0,
            ..Timeline::default()
        };
        assert!(t.validate().is_err());
        t.reset_start = 89.0;
        t.exit_end = 101.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn layers_share_the_same_boundaries() {
        let t = Timeline::default();
        let reveal = t.reveal_keyframes(600.0);
        let burn = t.burn_keyframes(600.0);
        let dragon = t.dragon_keyframes(600.0, 760.0);

        // The reveal holds full width until the burn completes, and the burn
        // and dragon move over the same span.
        assert!(reveal.contains("60% { width: 600px; }"));
        assert!(reveal.contains("88% { width: 600px; }"));
        assert!(reveal.contains("89% { width: 0px; }"));
        assert!(burn.contains("0%, 60% { transform: translateX(0px); }"));
        assert!(burn.contains("88% { transform: translateX(600px); }"));
        assert!(dragon.contains("88% { transform: translateX(600px); opacity: 1; }"));
        assert!(dragon.contains("96% { transform: translateX(760px); opacity: 0.7; }"));
    }

    #[test]
    fn reveal_resets_before_the_cycle_ends() {
        let t = Timeline::default();
        let reveal = t.reveal_keyframes(300.0);
        assert!(reveal.starts_with("@keyframes reveal {\n  0% { width: 0px; }"));
        assert!(reveal.contains("100% { width: 0px; }"));
        let dragon = t.dragon_keyframes(300.0, 460.0);
        assert!(dragon.contains("100% { transform: translateX(460px); opacity: 0; }"));
    }
}
