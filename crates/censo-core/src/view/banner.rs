use serde::Serialize;

use super::timers::TaskId;
use crate::popup::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BannerId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Error,
    Notice,
}

/// A transient, plain-text message shown above the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub id: BannerId,
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    /// Markup-safe rendering for surfaces that emit HTML
    pub fn html(&self) -> String {
        let class = match self.kind {
            BannerKind::Error => "alert alert-error",
            BannerKind::Notice => "alert alert-notice",
        };
        format!(r#"<div class="{}">{}</div>"#, class, escape_html(&self.message))
    }
}

/// Holds at most one banner together with its pending dismissal
#[derive(Debug, Default)]
pub(crate) struct BannerSlot {
    next_id: u64,
    current: Option<(Banner, TaskId)>,
}

impl BannerSlot {
    pub(crate) fn next_banner(&mut self, kind: BannerKind, message: impl Into<String>) -> Banner {
        let id = BannerId(self.next_id);
        self.next_id += 1;
        Banner {
            id,
            kind,
            message: message.into(),
        }
    }

    /// Install a banner, handing back the one it displaced
    pub(crate) fn install(&mut self, banner: Banner, dismissal: TaskId) -> Option<(Banner, TaskId)> {
        self.current.replace((banner, dismissal))
    }

    pub(crate) fn take(&mut self) -> Option<(Banner, TaskId)> {
        self.current.take()
    }

    /// Clear the slot if it still holds `id`
    pub(crate) fn expire(&mut self, id: BannerId) -> Option<Banner> {
        match &self.current {
            Some((banner, _)) if banner.id == id => self.current.take().map(|(b, _)| b),
            _ => None,
        }
    }

    pub(crate) fn current(&self) -> Option<&Banner> {
        self.current.as_ref().map(|(b, _)| b)
    }
}
