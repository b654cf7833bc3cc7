// SPDX-License-Identifier: MPL-2.0
//! The paginated template strip shown below the main panels.
//!
//! Renders one fixed-width slot per template of the current page, with
//! pager buttons on each side and a page indicator underneath. Empty
//! slots show a disabled placeholder so every page has the same width.

use crate::catalog::TemplateCatalog;
use crate::media::image::{placeholder_handle, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::image::Image;
use iced::widget::{button, Column, Row, Text};
use iced::{alignment, Element, Length};

/// Contextual data needed to render the strip.
pub struct ViewContext<'a> {
    pub catalog: &'a TemplateCatalog,
    /// Current 1-indexed page.
    pub page: usize,
}

/// Messages emitted by the strip.
#[derive(Debug, Clone)]
pub enum Message {
    PageBack,
    PageForward,
    /// A template was picked, identified by its catalog index.
    TemplatePicked(usize),
}

/// Render the template strip.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let max_page = ctx.catalog.max_page();

    let back_button = button(Text::new("<").align_x(alignment::Horizontal::Center))
        .width(Length::Fixed(sizing::PAGER_BUTTON_WIDTH))
        .on_press_maybe((ctx.page > 1).then_some(Message::PageBack));

    let forward_button = button(Text::new(">").align_x(alignment::Horizontal::Center))
        .width(Length::Fixed(sizing::PAGER_BUTTON_WIDTH))
        .on_press_maybe((ctx.page < max_page).then_some(Message::PageForward));

    let mut slots = Row::new().spacing(spacing::XS);
    for (slot, template) in ctx.catalog.page_slots(ctx.page).into_iter().enumerate() {
        let (handle, on_press) = match template {
            Some(template) => {
                let index = ctx.catalog.template_index(ctx.page, slot);
                (template.thumbnail(), Some(Message::TemplatePicked(index)))
            }
            None => (placeholder_handle(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT), None),
        };

        let thumbnail = Image::new(handle)
            .width(Length::Fixed(THUMBNAIL_WIDTH as f32))
            .height(Length::Fixed(THUMBNAIL_HEIGHT as f32));

        slots = slots.push(button(thumbnail).padding(spacing::XXS).on_press_maybe(on_press));
    }

    let strip = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(back_button)
        .push(slots)
        .push(forward_button);

    let indicator = Text::new(format!("Page {} / {}", ctx.page, max_page)).size(typography::CAPTION);

    Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(strip)
        .push(indicator)
        .into()
}
