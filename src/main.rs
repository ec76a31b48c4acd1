use iced::widget::{button, column, container, horizontal_space, pick_list, row, slider, text};
use iced::{Alignment, Element, Length, Task, Theme};
use image::DynamicImage;
use std::path::PathBuf;

mod filter;
mod library;
mod picker;
mod state;

use filter::{FilterKind, ParamKey};
use state::session::EditorState;
use state::settings::Settings;

/// Main application state
struct SnapFilter {
    /// Everything the screen shows: filter, parameters, source, processed image
    editor: EditorState,
    /// Display handle rebuilt whenever the processed image changes
    preview: Option<iced::widget::image::Handle>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the preview area to pick a picture
    PickImage,
    /// Background decode completed
    ImageLoaded(Result<DynamicImage, String>),
    /// User chose a filter from the list
    FilterSelected(FilterKind),
    /// User moved one of the parameter sliders
    ParameterChanged(ParamKey, f32),
    /// User let go of a slider; settings are persisted on release
    ParameterReleased,
    /// User clicked "Save"
    SavePressed,
    /// Background save completed
    SaveFinished(Result<PathBuf, String>),
}

impl SnapFilter {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let editor = EditorState::restore(settings.filter, settings.params);

        println!("🎨 Snap Filter ready, filter: {}", editor.filter.label());

        (
            SnapFilter {
                editor,
                preview: None,
                status: String::from("Select a picture to begin."),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                // Show the native image picker dialog
                if let Some(path) = picker::pick_photo() {
                    self.status = format!("Loading {}...", path.display());
                    return Task::perform(
                        async move { picker::load_photo(path).await.map_err(|e| e.to_string()) },
                        Message::ImageLoaded,
                    );
                }
                Task::none()
            }
            Message::ImageLoaded(Ok(image)) => {
                self.editor.set_source(image);
                self.refresh_preview();
                self.status = String::from("Image loaded.");
                Task::none()
            }
            Message::ImageLoaded(Err(e)) => {
                eprintln!("⚠️  Load failed: {}", e);
                self.status = String::from("Could not load that picture.");
                Task::none()
            }
            Message::FilterSelected(kind) => {
                self.editor.select_filter(kind);
                self.refresh_preview();
                self.persist_settings();
                Task::none()
            }
            Message::ParameterChanged(key, value) => {
                self.editor.set_parameter(key, value);
                self.refresh_preview();
                Task::none()
            }
            Message::ParameterReleased => {
                self.persist_settings();
                Task::none()
            }
            Message::SavePressed => match self.editor.processed.clone() {
                None => {
                    self.status = String::from("No image to save");
                    Task::none()
                }
                Some(image) => {
                    self.status = String::from("Saving...");
                    Task::perform(
                        async move { library::save_photo(image).await.map_err(|e| e.to_string()) },
                        Message::SaveFinished,
                    )
                }
            },
            Message::SaveFinished(Ok(path)) => {
                self.status = format!("Image saved to {}", path.display());
                Task::none()
            }
            Message::SaveFinished(Err(e)) => {
                eprintln!("⚠️  Save failed: {}", e);
                self.status = String::from("Could not save the image.");
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let preview: Element<Message> = match &self.preview {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => text("Select a picture").size(24).into(),
        };

        // The whole preview area doubles as the "pick a photo" button
        let preview_area = button(
            container(preview)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .on_press(Message::PickImage)
        .width(Length::Fill)
        .height(Length::FillPortion(3));

        // Only the sliders the active filter reads are shown
        let active = self.editor.filter;
        let mut controls = column![].spacing(12);
        if active.accepts(ParamKey::Intensity) {
            controls = controls.push(param_row(
                "Intensity",
                slider(0.0..=1.0, self.editor.params.intensity, |v| {
                    Message::ParameterChanged(ParamKey::Intensity, v)
                })
                .step(0.01)
                .on_release(Message::ParameterReleased),
            ));
        }
        if active.accepts(ParamKey::Radius) {
            controls = controls.push(param_row(
                "Radius",
                slider(0.0..=200.0, self.editor.params.radius, |v| {
                    Message::ParameterChanged(ParamKey::Radius, v)
                })
                .step(1.0)
                .on_release(Message::ParameterReleased),
            ));
        }
        if active.accepts(ParamKey::Scale) {
            controls = controls.push(param_row(
                "Scale",
                slider(1.0..=20.0, self.editor.params.scale, |v| {
                    Message::ParameterChanged(ParamKey::Scale, v)
                })
                .step(0.5)
                .on_release(Message::ParameterReleased),
            ));
        }

        let toolbar = row![
            pick_list(
                FilterKind::ALL,
                Some(self.editor.filter),
                Message::FilterSelected,
            ),
            horizontal_space(),
            button("Save").on_press(Message::SavePressed).padding(10),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let content = column![
            preview_area,
            controls,
            toolbar,
            text(&self.status).size(14),
        ]
        .spacing(20)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Rebuild the preview handle from the latest processed image
    fn refresh_preview(&mut self) {
        self.preview = self.editor.processed.as_ref().map(|img| {
            iced::widget::image::Handle::from_rgba(img.width(), img.height(), img.as_raw().clone())
        });
    }

    fn persist_settings(&self) {
        Settings {
            filter: self.editor.filter,
            params: self.editor.params,
        }
        .store();
    }
}

/// A labeled slider row
fn param_row<'a>(
    label: &'static str,
    control: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    row![text(label).width(Length::Fixed(80.0)), control.into()]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}

fn main() -> iced::Result {
    iced::application("Snap Filter", SnapFilter::update, SnapFilter::view)
        .theme(SnapFilter::theme)
        .centered()
        .run_with(SnapFilter::new)
}
