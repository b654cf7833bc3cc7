// SPDX-License-Identifier: MPL-2.0
//! Captioned image panels for the content, style, and result slots.
//!
//! Each panel shows a caption above a fixed-size framed image. Empty slots
//! render the gray placeholder so the layout never shifts.

use crate::media::image::IMAGE_SIZE;
use crate::ui::design_tokens::{border, palette, radius, spacing, typography};
use iced::widget::image::{Handle, Image};
use iced::widget::{container, Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

/// Renders a captioned panel holding one canonical-size image.
pub fn image_panel<'a, M: 'a>(caption: &'a str, handle: Handle) -> Element<'a, M> {
    let caption_widget = Text::new(caption).size(typography::TITLE_SM);

    let image_widget = Image::new(handle)
        .width(Length::Fixed(IMAGE_SIZE as f32))
        .height(Length::Fixed(IMAGE_SIZE as f32));

    let framed = Container::new(image_widget)
        .padding(spacing::XXS)
        .style(frame_style);

    Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(caption_widget)
        .push(framed)
        .into()
}

/// Style function for the image frame.
fn frame_style(theme: &Theme) -> container::Style {
    let bg_color = theme.extended_palette().background.weak.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}
