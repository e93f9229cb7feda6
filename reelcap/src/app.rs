use std::time::Instant;

use eframe::egui;
use eframe::egui::{
    CentralPanel, Color32, ColorImage, Context, Image, Key, TextureHandle, TextureOptions,
    ViewportBuilder, ViewportCommand,
};
use log::{error, info};

use reelcap_core::core::playback::PlaybackSession;

use crate::errors::{PlayerError, Result};

const WINDOW_TITLE: &str = "Reelcap";
const TEXTURE_NAME: &str = "frame";

/// Run the player window until the video ends or the user quits.
pub fn run(session: PlaybackSession, width: u32, height: u32) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([width as f32, height as f32]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(PlayerWindow::new(session)))),
    )
    .map_err(|e| PlayerError::Window(e.to_string()))
}

/// The window which drives the playback session and presents its frames.
struct PlayerWindow {
    session: PlaybackSession,
    texture: Option<TextureHandle>,
    last_advance: Option<Instant>,
}

impl PlayerWindow {
    fn new(session: PlaybackSession) -> Self {
        Self {
            session,
            texture: None,
            last_advance: None,
        }
    }

    /// Handle the pressed keys of this input frame.
    ///
    /// It returns `false` when the user has requested to quit.
    fn handle_input(&mut self, ctx: &Context) -> bool {
        if ctx.input(|e| e.key_pressed(Key::Space)) {
            self.session.toggle_pause();
        }
        if ctx.input(|e| e.key_pressed(Key::S)) {
            if let Err(e) = self.session.take_screenshot() {
                error!("{}", e);
            }
        }
        if ctx.input(|e| e.key_pressed(Key::Q) || e.key_pressed(Key::Escape)) {
            info!("Quitting...");
            return false;
        }

        true
    }

    fn update_texture(&mut self, ctx: &Context) {
        if let Some(frame) = self.session.display_frame() {
            let size = [frame.width() as usize, frame.height() as usize];
            let image = ColorImage::from_rgb(size, frame.as_raw());

            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    self.texture =
                        Some(ctx.load_texture(TEXTURE_NAME, image, TextureOptions::LINEAR))
                }
            }
        }
    }
}

impl eframe::App for PlayerWindow {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if !self.handle_input(ctx) {
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        }

        // input events trigger additional updates, so the session is only
        // advanced once the frame delay has elapsed
        let due = self
            .last_advance
            .map(|e| e.elapsed() >= self.session.frame_interval())
            .unwrap_or(true);
        if due {
            self.last_advance = Some(Instant::now());
            if !self.session.advance() {
                ctx.send_viewport_cmd(ViewportCommand::Close);
                return;
            }
            self.update_texture(ctx);
        }

        CentralPanel::default()
            .frame(egui::Frame::default().fill(Color32::BLACK))
            .show(ctx, |ui| {
                if let Some(texture) = &self.texture {
                    ui.centered_and_justified(|ui| {
                        ui.add(Image::new(texture).shrink_to_fit());
                    });
                }
            });

        ctx.request_repaint_after(self.session.frame_interval());
    }
}
