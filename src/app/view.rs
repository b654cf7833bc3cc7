// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Single-screen layout: the content and style panels on the left, the
//! result panel with its action buttons on the right, and the template
//! strip along the bottom. Buttons that cannot act in the current state
//! are disabled rather than hidden.

use super::{App, Message};
use crate::media::image::{placeholder_handle, IMAGE_SIZE};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Toast;
use crate::ui::{panels, template_strip};
use iced::widget::rule::{horizontal as horizontal_rule, vertical as vertical_rule};
use iced::widget::{button, Column, Row, Stack, Text};
use iced::{alignment, Element, Length};

impl App {
    /// Renders the whole window.
    pub fn view(&self) -> Element<'_, Message> {
        let recording = self.capture.is_recording();
        let filtering = self.capture.is_filtering();

        let content_handle = self
            .content
            .as_ref()
            .map_or_else(|| placeholder_handle(IMAGE_SIZE, IMAGE_SIZE), |image| image.handle());
        let style_handle = self
            .style
            .as_ref()
            .map_or_else(|| placeholder_handle(IMAGE_SIZE, IMAGE_SIZE), |image| image.handle());
        let result_handle = self
            .result
            .as_ref()
            .map_or_else(|| placeholder_handle(IMAGE_SIZE, IMAGE_SIZE), super::state::ResultImage::handle);

        let control_column = Column::new()
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center)
            .push(panels::image_panel("Image", content_handle))
            .push(action_button("Choose Image", Some(Message::ChooseContent), false))
            .push(horizontal_rule(1))
            .push(panels::image_panel("Style", style_handle))
            .push(action_button("Choose Style", Some(Message::ChooseStyle), false));

        let combine_button = action_button(
            "Combine",
            (!recording).then_some(Message::Combine),
            false,
        );
        let save_button = action_button(
            "Save",
            self.result.as_ref().map(|_| Message::Save),
            false,
        );
        let camera_button = action_button("Open Camera", Some(Message::ToggleCamera), recording);
        let filter_button = action_button(
            "Apply Filter",
            recording.then_some(Message::ToggleFilter),
            filtering,
        );

        let result_column = Column::new()
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center)
            .push(panels::image_panel("Result", result_handle))
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(combine_button)
                    .push(save_button),
            )
            .push(
                Row::new()
                    .spacing(spacing::XS)
                    .push(camera_button)
                    .push(filter_button),
            );

        let main_row = Row::new()
            .spacing(spacing::LG)
            .push(control_column)
            .push(vertical_rule(1))
            .push(result_column);

        let strip_section = Column::new()
            .spacing(spacing::XXS)
            .align_x(alignment::Horizontal::Center)
            .push(Text::new("Choose Template").size(typography::BODY))
            .push(
                template_strip::view(template_strip::ViewContext {
                    catalog: &self.catalog,
                    page: self.page,
                })
                .map(Message::TemplateStrip),
            );

        let layout = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::MD)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .push(main_row)
            .push(horizontal_rule(1))
            .push(strip_section);

        let toasts = Toast::view_overlay(&self.notifications).map(Message::Notification);

        Stack::new().push(layout).push(toasts).into()
    }
}

/// A fixed-height text button. `active` switches to the danger palette,
/// mirroring the recording and filtering indicators.
fn action_button(
    label: &str,
    on_press: Option<Message>,
    active: bool,
) -> Element<'_, Message> {
    let styled = button(
        Text::new(label)
            .size(typography::BODY)
            .align_x(alignment::Horizontal::Center),
    )
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .on_press_maybe(on_press);

    let styled = if active {
        styled.style(button::danger)
    } else {
        styled.style(button::primary)
    };

    styled.into()
}
