use anyhow::{anyhow, Context};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::SwapInterval,
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{ffi::CString, fmt::Display, num::NonZeroU32, process::ExitCode, ptr};
use winit::{
    dpi::LogicalSize,
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::render::{NativeGl, RenderPipeline, Scene};
use crate::utils::error::Error;

/// Runs `scene` until its window is closed and maps the outcome to a process
/// exit status: `0` on a normal close, `1` on any failure.
pub fn launch(scene: Scene) -> ExitCode {
    if let Err(err) = SimpleLogger::new().with_level(LevelFilter::Info).init() {
        eprintln!("Unable to initialize logging: {}", err);
        return ExitCode::FAILURE;
    }

    let result = run(&scene);
    match &result {
        Ok(()) => info!("{} closed", scene.name),
        Err(err) => error!("{}", err),
    }
    ExitCode::from(exit_status(&result))
}

pub fn exit_status(result: &Result<(), Error>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn init_failure(context: &str, err: impl Display) -> Error {
    Error::Init(anyhow!("{}: {}", context, err))
}

/// Entry with the most samples, the first one on ties.
fn most_samples<T>(configs: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    configs.reduce(|accum, config| {
        if samples(&config) > samples(&accum) {
            config
        } else {
            accum
        }
    })
}

pub fn run(scene: &Scene) -> Result<(), Error> {
    info!("Initializing {}...", scene.name);

    let event_loop =
        EventLoop::new().map_err(|err| init_failure("Unable to create event loop", err))?;
    let window_builder = WindowBuilder::new()
        .with_title(scene.app.title)
        .with_inner_size(LogicalSize::new(scene.app.width, scene.app.height));

    let template = ConfigTemplateBuilder::new().with_alpha_size(8);
    let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

    let (window, gl_config) = display_builder
        .build(&event_loop, template, |configs| {
            // glutin returns BadConfig before calling the picker when nothing matches.
            most_samples(configs, |config| config.num_samples()).unwrap()
        })
        .map_err(|err| init_failure("Unable to create window", err))?;
    let window = window.context("Unable to create window")?;

    let (major, minor) = scene.app.gl_version;
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
        .with_profile(GlProfile::Core)
        .build(Some(window.raw_window_handle()));

    let gl_display = gl_config.display();
    let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
        .with_context(|| format!("Unable to create OpenGL {}.{} core context", major, minor))?;

    let attrs = window.build_surface_attributes(<_>::default());
    let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
        .context("Unable to create GL surface")?;

    let gl_context = gl_context
        .make_current(&gl_surface)
        .context("Unable to make context current")?;

    if let Err(err) = gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN)) {
        warn!("Unable to enable vsync: {}", err);
    }

    let gl = NativeGl::load(|symbol| match CString::new(symbol) {
        Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
        Err(_) => ptr::null(),
    })
    .context("Unable to load OpenGL functions")?;
    info!("OpenGL {} on {}", gl.version_string(), gl.renderer_string());

    let mut pipeline = RenderPipeline::new(&gl, scene)?;
    let size = window.inner_size();
    pipeline.resize(size.width, size.height);

    let mut failure = None;
    event_loop.run(|event, elwt| match event {
        Event::NewEvents(StartCause::Init) => elwt.set_control_flow(ControlFlow::Poll),
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                if let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                {
                    gl_surface.resize(&gl_context, width, height);
                }
                pipeline.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                pipeline.render_frame();
                if let Err(err) = gl_surface.swap_buffers(&gl_context) {
                    failure = Some(Error::Present(err));
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    })?;

    failure.map_or(Ok(()), Err)
}
