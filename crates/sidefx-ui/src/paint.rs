//! Text painter: lays a view tree out as terminal lines and collects the
//! clickable regions.

use sidefx_core::{HitRegion, Scene, TextStyle, View, ViewKind};

const BAR_WIDTH: usize = 20;
const RULE_WIDTH: usize = 32;

struct Painter {
    next_id: u64,
    hits: Vec<HitRegion>,
}

impl Painter {
    fn id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn paint(&mut self, view: &View) -> Vec<String> {
        let id = self.id();
        match &view.kind {
            ViewKind::Surface | ViewKind::Column => self.paint_children(view),
            ViewKind::Row => {
                let cells: Vec<String> = view
                    .children
                    .iter()
                    .map(|c| self.paint(c).join(" "))
                    .filter(|cell| !cell.is_empty())
                    .collect();
                vec![cells.join("  ")]
            }
            ViewKind::Card => {
                let border = format!("+{}", "-".repeat(RULE_WIDTH - 1));
                let mut out = vec![border.clone()];
                out.extend(
                    self.paint_children(view)
                        .into_iter()
                        .map(|l| format!("| {l}").trim_end().to_string()),
                );
                out.push(border);
                out
            }
            ViewKind::Text { text, style } => match style {
                TextStyle::Headline => vec![format!("# {text}")],
                TextStyle::Title => vec![format!("## {text}")],
                TextStyle::Body => vec![text.clone()],
            },
            ViewKind::Button {
                text,
                enabled,
                on_click,
            } => {
                self.hits.push(HitRegion {
                    id,
                    label: text.clone(),
                    enabled: *enabled,
                    on_click: on_click.clone(),
                });
                if *enabled {
                    vec![format!("[ {text} ]")]
                } else {
                    vec![format!("[ {text} ] (disabled)")]
                }
            }
            ViewKind::ProgressIndicator => vec![format!("[{}]", "~".repeat(BAR_WIDTH))],
            ViewKind::Divider => vec!["-".repeat(RULE_WIDTH)],
        }
    }

    fn paint_children(&mut self, view: &View) -> Vec<String> {
        view.children.iter().flat_map(|c| self.paint(c)).collect()
    }
}

/// Paints `root`; button ids are assigned in paint order starting at 1.
pub fn layout_and_paint(root: &View) -> (Scene, Vec<HitRegion>) {
    let mut painter = Painter {
        next_id: 1,
        hits: Vec::new(),
    };
    let lines = painter.paint(root);
    log::trace!(
        "painted {} line(s), {} hit region(s)",
        lines.len(),
        painter.hits.len()
    );
    (Scene { lines }, painter.hits)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use sidefx_core::Frame;

    use super::*;
    use crate::*;

    #[test]
    fn paints_cards_buttons_and_progress() {
        let root = Surface(Column().child((
            Text("Demo").text_style(TextStyle::Headline),
            Divider(),
            Card().child((
                Text("Section").text_style(TextStyle::Title),
                Text("status"),
                LinearProgressIndicator(),
                Row().child((Button("One", || {}), Button("Two", || {}).enabled(false))),
            )),
        )));

        let (scene, hits) = layout_and_paint(&root);
        insta::assert_snapshot!(scene.text(), @r"
        # Demo
        --------------------------------
        +-------------------------------
        | ## Section
        | status
        | [~~~~~~~~~~~~~~~~~~~~]
        | [ One ]  [ Two ] (disabled)
        +-------------------------------
        ");
        assert_eq!(hits.len(), 2);
        assert!(hits[0].enabled);
        assert!(!hits[1].enabled);
    }

    #[test]
    fn hit_regions_carry_click_handlers() {
        let clicks = Rc::new(Cell::new(0));
        let root = Column().child(Button("Go", {
            let clicks = clicks.clone();
            move || clicks.set(clicks.get() + 1)
        }));

        let (scene, hits) = layout_and_paint(&root);
        let frame = Frame { scene, hit_regions: hits };
        let handler = frame.click_handler("Go").unwrap();
        handler();
        handler();
        assert_eq!(clicks.get(), 2);
        assert!(frame.click_handler("Missing").is_none());
    }

    #[test]
    fn disabled_buttons_have_no_handler() {
        let root = Button("Busy", || {}).enabled(false);
        let (scene, hit_regions) = layout_and_paint(&root);
        let frame = Frame { scene, hit_regions };
        assert!(frame.hit_regions.iter().any(|h| h.label == "Busy" && !h.enabled));
        assert!(frame.click_handler("Busy").is_none());
    }
}
