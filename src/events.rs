//! Style-change plumbing. A watch channel carries the latest snapshot; the
//! render loop polls it once per frame and only ever sees the newest value.

use tokio::sync::watch;

use crate::style::StyleSnapshot;

pub type StyleSender = watch::Sender<StyleSnapshot>;
pub type StyleReceiver = watch::Receiver<StyleSnapshot>;

/// A closed channel simply means no further style updates arrive; the face
/// keeps rendering with the last snapshot.
pub fn style_channel(initial: StyleSnapshot) -> (StyleSender, StyleReceiver) {
    watch::channel(initial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_sees_latest_snapshot_only() {
        let (tx, mut rx) = style_channel(StyleSnapshot::default());
        assert!(!rx.has_changed().unwrap());
        tx.send_replace(StyleSnapshot {
            color_id: "#1ABC9C".to_string(),
            font_id: "2".to_string(),
        });
        tx.send_replace(StyleSnapshot {
            color_id: "#E74C3C".to_string(),
            font_id: "3".to_string(),
        });
        assert!(rx.has_changed().unwrap());
        let latest = rx.borrow_and_update().clone();
        assert_eq!(latest.color_id, "#E74C3C");
        assert!(!rx.has_changed().unwrap());
    }
}
