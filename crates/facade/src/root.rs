use gpui::{
    AnyView, AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled,
    Window, div,
};
use gpui_component::{Root, v_flex};

use crate::title_bar::FacadeTitleBar;

/// Window content: title bar on top, the gallery below, overlay layers last.
pub struct FacadeRoot {
    title_bar: Entity<FacadeTitleBar>,
    view: AnyView,
}

impl FacadeRoot {
    pub fn new(
        title: impl Into<SharedString>,
        view: impl Into<AnyView>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let title_bar = cx.new(|cx| FacadeTitleBar::new(title, window, cx));
        Self {
            title_bar,
            view: view.into(),
        }
    }
}

impl Render for FacadeRoot {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let modal_layer = Root::render_modal_layer(window, cx);
        let notification_layer = Root::render_notification_layer(window, cx);

        div()
            .size_full()
            .child(
                v_flex()
                    .size_full()
                    .child(self.title_bar.clone())
                    .child(
                        div()
                            .flex_1()
                            .p_4()
                            .overflow_hidden()
                            .child(self.view.clone()),
                    ),
            )
            .children(modal_layer)
            .child(div().absolute().top_8().children(notification_layer))
    }
}
