#![allow(non_snake_case)]
//! Widgets and the text painter.

pub mod paint;

use std::rc::Rc;

use sidefx_core::*;

pub use paint::layout_and_paint;

pub fn Surface(child: View) -> View {
    View::new(0, ViewKind::Surface).with_children(vec![child])
}

pub fn Column() -> View {
    View::new(0, ViewKind::Column)
}

pub fn Row() -> View {
    View::new(0, ViewKind::Row)
}

pub fn Card() -> View {
    View::new(0, ViewKind::Card)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::Text {
            text: text.into(),
            style: TextStyle::Body,
        },
    )
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    View::new(
        0,
        ViewKind::Button {
            text: text.into(),
            enabled: true,
            on_click: Some(Rc::new(on_click)),
        },
    )
}

/// Busy indicator with no known progress.
pub fn LinearProgressIndicator() -> View {
    View::new(0, ViewKind::ProgressIndicator)
}

pub fn Divider() -> View {
    View::new(0, ViewKind::Divider)
}

pub trait TextExt {
    fn text_style(self, style: TextStyle) -> View;
}

impl TextExt for View {
    fn text_style(mut self, s: TextStyle) -> View {
        if let ViewKind::Text { style, .. } = &mut self.kind {
            *style = s;
        }
        self
    }
}

pub trait ButtonExt {
    fn enabled(self, enabled: bool) -> View;
}

impl ButtonExt for View {
    fn enabled(mut self, value: bool) -> View {
        if let ViewKind::Button { enabled, .. } = &mut self.kind {
            *enabled = value;
        }
        self
    }
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(mut self, children: impl IntoChildren) -> Self {
        self.children.extend(children.into_children());
        self
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl IntoChildren for Option<View> {
    fn into_children(self) -> Vec<View> {
        self.into_iter().collect()
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

// Tuple implementations
macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J);
