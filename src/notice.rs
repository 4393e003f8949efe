//! Notification model: a single live notice, replaced on every show.

pub const AUTO_DISMISS_MS: u32 = 5_000;
pub const EXIT_ANIMATION_MS: u32 = 300;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "⚠",
            _ => "✓",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// The one slot a notice can occupy. Showing a new notice removes the
/// current one immediately; ids let stale dismiss timers be ignored.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct NoticeSlot {
    next_id: u64,
    current: Option<Notice>,
}

impl NoticeSlot {
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(Notice {
            id,
            message: message.into(),
            severity,
        });
        id
    }

    /// Remove the notice if `id` still names the live one.
    pub fn dismiss(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|notice| notice.id == id) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_show_replaces_first() {
        let mut slot = NoticeSlot::default();
        let first = slot.show("one", Severity::Error);
        let second = slot.show("two", Severity::Success);

        assert_ne!(first, second);
        let live = slot.current().expect("notice live");
        assert_eq!(live.message, "two");
        assert_eq!(live.severity, Severity::Success);
    }

    #[test]
    fn dismiss_clears_only_the_matching_notice() {
        let mut slot = NoticeSlot::default();
        let stale = slot.show("one", Severity::Info);
        let live = slot.show("two", Severity::Info);

        slot.dismiss(stale);
        assert!(slot.current().is_some());

        slot.dismiss(live);
        assert!(slot.current().is_none());

        // Dismissing again is a no-op.
        slot.dismiss(live);
        assert!(slot.current().is_none());
    }

    #[test]
    fn severity_icons() {
        assert_eq!(Severity::Error.icon(), "⚠");
        assert_eq!(Severity::Success.icon(), "✓");
        assert_eq!(Severity::Info.icon(), "✓");
    }
}
