//! fltk viewer shell.
//!
//! Presentation only: widget construction, file choosers, dialogs, and
//! text drawing live here. Parsing, clipping, and rendering are delegated
//! to the core modules, and every button press runs synchronously to
//! completion on the UI thread.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fltk::{
    app,
    button::Button,
    dialog,
    draw,
    enums::{Align, Color, ColorDepth, Font, FrameType},
    frame::Frame,
    group::Flex,
    input::Input,
    prelude::*,
    widget::Widget,
    window::Window,
};
use tracing::info;

use crate::clip::{TimeWindow, write_clip_wav};
use crate::config::Config;
use crate::constants::viewer;
use crate::error::{Error, Result};
use crate::export::export_segments;
use crate::render::{WaveformPlot, render, write_png};
use crate::session::{LoadedView, Session};

/// Mutable state behind the widget callbacks.
#[derive(Default)]
struct ViewerState {
    audio_path: Option<PathBuf>,
    rttm_path: Option<PathBuf>,
    view: Option<LoadedView>,
    plot: Option<WaveformPlot>,
}

/// Open the viewer window and run the event loop until it closes.
///
/// `audio` and `rttm` prefill the session when given on the command line.
///
/// # Errors
///
/// Returns [`Error::Viewer`] if the event loop fails to run.
pub fn run_viewer(config: &Config, audio: Option<PathBuf>, rttm: Option<PathBuf>) -> Result<()> {
    let app = app::App::default();

    let mut win = Window::new(
        100,
        100,
        config.viewer.window_width,
        config.viewer.window_height,
        viewer::WINDOW_TITLE,
    );
    win.make_resizable(true);

    let state = Rc::new(RefCell::new(ViewerState {
        audio_path: audio,
        rttm_path: rttm,
        ..ViewerState::default()
    }));
    let render_opts = config.display.render_options();

    let mut root = Flex::default_fill().row();

    // ---------------- Control column ----------------
    let mut controls = Flex::default().column();
    root.fixed(&controls, viewer::CONTROL_WIDTH);

    let mut title = Frame::default().with_label("Diarization Viewer");
    title.set_label_size(16);
    controls.fixed(&title, 30);

    let mut btn_open_audio = Button::default().with_label("Open Audio File");
    controls.fixed(&btn_open_audio, 30);

    let mut lbl_audio = Frame::default();
    lbl_audio.set_align(Align::Inside | Align::Left);
    controls.fixed(&lbl_audio, 20);

    let mut btn_open_rttm = Button::default().with_label("Open RTTM File");
    controls.fixed(&btn_open_rttm, 30);

    let mut lbl_rttm = Frame::default();
    lbl_rttm.set_align(Align::Inside | Align::Left);
    controls.fixed(&lbl_rttm, 20);

    let sep1 = Frame::default().with_label("─────────────────");
    controls.fixed(&sep1, 20);

    let mut lbl_window = Frame::default().with_label("Time window (optional):");
    lbl_window.set_align(Align::Inside | Align::Left);
    controls.fixed(&lbl_window, 20);

    let input_start = Input::default().with_label("Start:");
    controls.fixed(&input_start, 28);

    let input_end = Input::default().with_label("End:");
    controls.fixed(&input_end, 28);

    let mut btn_display = Button::default().with_label("Display Waveform");
    controls.fixed(&btn_display, 30);

    let sep2 = Frame::default().with_label("─────────────────");
    controls.fixed(&sep2, 20);

    let mut btn_save_png = Button::default().with_label("Save Plot as PNG");
    controls.fixed(&btn_save_png, 30);

    let mut btn_export = Button::default().with_label("Export Segments");
    controls.fixed(&btn_export, 30);

    let mut btn_save_clip = Button::default().with_label("Save Clip as WAV");
    controls.fixed(&btn_save_clip, 30);

    let mut btn_reset = Button::default().with_label("Reset");
    controls.fixed(&btn_reset, 30);

    let mut status = Frame::default().with_label("Status: Ready");
    status.set_align(Align::Inside | Align::Left);
    controls.fixed(&status, 25);

    controls.end();

    // ---------------- Display area ----------------
    let mut display = Widget::default();
    display.set_frame(FrameType::DownBox);

    root.end();

    {
        let st = state.borrow();
        if let Some(path) = &st.audio_path {
            lbl_audio.set_label(&format!("Audio: {}", short_name(path)));
        }
        if let Some(path) = &st.rttm_path {
            lbl_rttm.set_label(&format!("RTTM: {}", short_name(path)));
        }
    }

    // ---------------- Callbacks ----------------

    {
        let state = state.clone();
        let mut lbl_audio = lbl_audio.clone();
        let mut status = status.clone();
        btn_open_audio.set_callback(move |_| {
            let mut chooser =
                dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseFile);
            chooser.set_filter("*.wav");
            chooser.show();

            let filename = chooser.filename();
            if filename.as_os_str().is_empty() {
                return;
            }

            lbl_audio.set_label(&format!("Audio: {}", short_name(&filename)));
            status.set_label("Status: audio file selected");
            state.borrow_mut().audio_path = Some(filename);
        });
    }

    {
        let state = state.clone();
        let mut lbl_rttm = lbl_rttm.clone();
        let mut status = status.clone();
        btn_open_rttm.set_callback(move |_| {
            let mut chooser =
                dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseFile);
            chooser.set_filter("*.rttm");
            chooser.show();

            let filename = chooser.filename();
            if filename.as_os_str().is_empty() {
                return;
            }

            lbl_rttm.set_label(&format!("RTTM: {}", short_name(&filename)));
            status.set_label("Status: RTTM file selected");
            state.borrow_mut().rttm_path = Some(filename);
        });
    }

    {
        let state = state.clone();
        let input_start = input_start.clone();
        let input_end = input_end.clone();
        let mut status = status.clone();
        let mut display = display.clone();
        btn_display.set_callback(move |_| {
            let paths = {
                let st = state.borrow();
                st.audio_path.clone().zip(st.rttm_path.clone())
            };
            let Some((audio_path, rttm_path)) = paths else {
                dialog::alert_default("Please select both a WAV file and an RTTM file.");
                return;
            };

            let window = match parse_window_inputs(&input_start.value(), &input_end.value()) {
                Ok(window) => window,
                Err(message) => {
                    dialog::alert_default(&message);
                    return;
                }
            };

            let session = Session::new(audio_path, rttm_path);
            match session.load_view(window) {
                Ok(view) => {
                    if let Some(requested) = view.clamped_end {
                        dialog::alert_default(&format!(
                            "Entered end time {requested:.2}s exceeds the audio duration \
                             of {:.2}s.\nThe waveform will be plotted to the end of the file.",
                            view.total_duration
                        ));
                    }

                    let plot = render(
                        &view.samples,
                        view.sample_rate,
                        &view.segments,
                        view.time_offset,
                        &render_opts,
                    );
                    info!(
                        "Rendered {} segment(s) over {:.2}s",
                        view.segments.len(),
                        view.display_duration_secs()
                    );
                    status.set_label(&format!(
                        "Status: {} segment(s), {:.2}s",
                        view.segments.len(),
                        view.display_duration_secs()
                    ));

                    let mut st = state.borrow_mut();
                    st.view = Some(view);
                    st.plot = Some(plot);
                    drop(st);
                    display.redraw();
                }
                Err(e) => {
                    dialog::alert_default(&error_message(&e));
                    status.set_label("Status: display failed");
                }
            }
        });
    }

    {
        let state = state.clone();
        let mut status = status.clone();
        btn_save_png.set_callback(move |_| {
            let plot = { state.borrow().plot.clone() };
            let Some(plot) = plot else {
                dialog::alert_default("No waveform to save yet. Press Display Waveform first.");
                return;
            };

            let Some(filename) = choose_save_path("*.png", "waveform.png") else {
                return;
            };

            match write_png(&filename, &plot) {
                Ok(()) => status.set_label("Status: plot saved"),
                Err(e) => {
                    dialog::alert_default(&error_message(&e));
                    status.set_label("Status: save failed");
                }
            }
        });
    }

    {
        let state = state.clone();
        let mut status = status.clone();
        btn_export.set_callback(move |_| {
            let view = { state.borrow().view.clone() };
            let Some(view) = view else {
                dialog::alert_default("No segments to export yet. Press Display Waveform first.");
                return;
            };

            let Some(filename) = choose_save_path("*.{csv,json,txt}", "segments.csv") else {
                return;
            };

            match export_segments(&filename, &view.segments, &view.export_context()) {
                Ok(()) => status.set_label("Status: segments exported"),
                Err(e) => {
                    dialog::alert_default(&error_message(&e));
                    status.set_label("Status: export failed");
                }
            }
        });
    }

    {
        let state = state.clone();
        let mut status = status.clone();
        btn_save_clip.set_callback(move |_| {
            let view = { state.borrow().view.clone() };
            let Some(view) = view else {
                dialog::alert_default("No waveform to save yet. Press Display Waveform first.");
                return;
            };

            let Some(filename) = choose_save_path("*.wav", "clip.wav") else {
                return;
            };

            match write_clip_wav(&filename, &view.samples, view.sample_rate) {
                Ok(()) => status.set_label("Status: clip saved"),
                Err(e) => {
                    dialog::alert_default(&error_message(&e));
                    status.set_label("Status: save failed");
                }
            }
        });
    }

    {
        let state = state.clone();
        let mut lbl_audio = lbl_audio.clone();
        let mut lbl_rttm = lbl_rttm.clone();
        let mut input_start = input_start.clone();
        let mut input_end = input_end.clone();
        let mut status = status.clone();
        let mut display = display.clone();
        btn_reset.set_callback(move |_| {
            *state.borrow_mut() = ViewerState::default();
            lbl_audio.set_label("");
            lbl_rttm.set_label("");
            input_start.set_value("");
            input_end.set_value("");
            status.set_label("Status: Ready");
            display.redraw();
        });
    }

    {
        let state = state.clone();
        display.draw(move |w| {
            if w.w() <= 0 || w.h() <= 0 {
                return;
            }

            draw::set_draw_color(Color::from_rgb(237, 237, 243));
            draw::draw_rectf(w.x(), w.y(), w.w(), w.h());

            let st = state.borrow();
            if let Some(plot) = &st.plot {
                draw_plot(plot, w.x(), w.y(), w.w(), w.h());
            } else {
                draw::set_draw_color(Color::from_rgb(70, 70, 70));
                draw::set_font(Font::Helvetica, 14);
                draw::draw_text(
                    "Select a WAV and an RTTM file, then press Display Waveform",
                    w.x() + 12,
                    w.y() + w.h() / 2,
                );
            }
        });
    }

    win.end();
    win.show();

    app.run().map_err(|e| Error::Viewer {
        reason: e.to_string(),
    })
}

/// Draw the plot artifact centered in the display area, with tick labels
/// and a legend on top.
#[allow(clippy::cast_possible_wrap)]
fn draw_plot(plot: &WaveformPlot, x: i32, y: i32, w: i32, h: i32) {
    let plot_w = plot.width as i32;
    let plot_h = plot.height as i32;
    let origin_x = x + (w - plot_w).max(0) / 2;
    let origin_y = y + (h - plot_h).max(0) / 2;

    draw::draw_image(&plot.pixels, origin_x, origin_y, plot_w, plot_h, ColorDepth::Rgb8).ok();

    draw::set_font(Font::Helvetica, 11);
    draw::set_draw_color(Color::from_rgb(40, 40, 40));

    for tick in &plot.time_ticks {
        draw::draw_text(
            &format!("{:.1}", tick.seconds),
            origin_x + tick.x as i32 - 8,
            origin_y + plot_h - 6,
        );
    }
    for tick in &plot.amp_ticks {
        draw::draw_text(
            &format!("{:+.1}", tick.value),
            origin_x + 2,
            origin_y + tick.y as i32 + 4,
        );
    }

    draw::draw_text("Time (s)", origin_x + plot_w / 2 - 20, origin_y + plot_h + 14);

    let legend_x = origin_x + plot_w - 150;
    let mut legend_y = origin_y + 10;
    for entry in &plot.legend {
        draw::set_draw_color(Color::from_rgb(
            entry.color[0],
            entry.color[1],
            entry.color[2],
        ));
        draw::draw_rectf(legend_x, legend_y, 12, 12);
        draw::set_draw_color(Color::from_rgb(40, 40, 40));
        draw::draw_text(&entry.label, legend_x + 18, legend_y + 11);
        legend_y += 17;
    }
}

/// Show a native save chooser; `None` when the user cancels.
fn choose_save_path(filter: &str, preset: &str) -> Option<PathBuf> {
    let mut chooser =
        dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseSaveFile);
    chooser.set_filter(filter);
    chooser.set_preset_file(preset);
    chooser.show();

    let filename = chooser.filename();
    if filename.as_os_str().is_empty() {
        None
    } else {
        Some(filename)
    }
}

/// Parse the two time inputs into an optional window.
///
/// Both empty means the whole file; exactly one filled is rejected so a
/// half-specified window never silently falls back.
fn parse_window_inputs(start: &str, end: &str) -> std::result::Result<Option<TimeWindow>, String> {
    let start = start.trim();
    let end = end.trim();

    match (start.is_empty(), end.is_empty()) {
        (true, true) => Ok(None),
        (false, false) => {
            let start: f64 = start
                .parse()
                .map_err(|_| format!("'{start}' is not a valid start time in seconds."))?;
            let end: f64 = end
                .parse()
                .map_err(|_| format!("'{end}' is not a valid end time in seconds."))?;
            if start < 0.0 || end < 0.0 {
                return Err("Times must be non-negative.".to_string());
            }
            Ok(Some(TimeWindow::from_range(start, end)))
        }
        _ => Err(
            "Enter both start and end times, or leave both empty to plot the whole file."
                .to_string(),
        ),
    }
}

/// File name portion of a path for the selected-file labels.
fn short_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Error text for dialogs, including the source chain.
fn error_message(err: &Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push('\n');
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
