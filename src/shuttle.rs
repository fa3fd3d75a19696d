use std::path::PathBuf;
use std::sync::Arc;

use catalog::{HostId, Hosts};
use settings::Settings;
use terminal::{Dispatcher, ITerm};
use tokio::runtime::Handle;
use tokio::sync::{Mutex, watch};
use tray::{MENU_ID_CONFIGURE, MENU_ID_QUIT, MENU_ID_RELOAD, MenuEvent, Tray, build_menu};
use winit::application::ApplicationHandler;
use winit::event::StartCause;
use winit::event_loop::ActiveEventLoop;

use crate::dispatch;

#[derive(Debug)]
pub enum UserEvent {
    #[cfg_attr(
        target_os = "linux",
        expect(dead_code, reason = "menu events are polled on the GTK thread")
    )]
    MenuEvent(MenuEvent),
    Quit,
}

/// Tray state: the loaded settings, their hosts and the dispatcher that
/// opens them.
pub struct Shuttle {
    config_path: PathBuf,
    settings: Settings,
    hosts: Hosts,
    tray: Tray,
    runtime: Handle,
    dispatcher: Arc<Dispatcher<ITerm>>,
    /// Outlives reloads so a rebuilt dispatcher still waits for the old one.
    gate: Arc<Mutex<()>>,
    shutdown: watch::Sender<bool>,
}

impl Shuttle {
    pub fn new(config_path: PathBuf, settings: Settings, runtime: Handle) -> Self {
        let gate = Arc::default();

        Self {
            config_path,
            hosts: settings.hosts(),
            dispatcher: Arc::new(dispatch::from_settings(&settings, Arc::clone(&gate))),
            gate,
            settings,
            tray: Tray::new(),
            runtime,
            shutdown: watch::Sender::new(false),
        }
    }

    pub fn init(&mut self) {
        self.tray.init(build_menu(&self.hosts));
    }

    /// Returns `true` when the application should exit.
    pub fn handle_menu_event(&mut self, event: MenuEvent) -> bool {
        let menu_id = event.id.0.as_str();

        match menu_id {
            MENU_ID_QUIT => {
                self.shutdown.send_replace(true);
                self.tray.destroy();
                return true;
            }
            MENU_ID_CONFIGURE => self.configure(),
            MENU_ID_RELOAD => self.reload(),
            _ => match HostId::parse(menu_id).and_then(|id| self.hosts.get(id)) {
                Some(host) => {
                    log::info!("opening {}", host.title());
                    self.launch(host.cmd.clone());
                }
                None => log::warn!("unknown menu item {menu_id:?}"),
            },
        }

        false
    }

    /// Runs a dispatch in the background. Quitting cancels it.
    fn launch(&self, cmd: String) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let cancel = self.shutdown.subscribe();

        self.runtime.spawn(async move {
            if let Err(e) = dispatcher.dispatch(&cmd, &cancel).await {
                log::error!("failed to open {cmd:?}: {e}");
            }
        });
    }

    fn configure(&self) {
        let path = &self.config_path;

        let result = match self.settings.editor.as_str() {
            Settings::DEFAULT_EDITOR => open::that(path),
            editor if is_terminal_editor(editor) => {
                self.launch(format!("{editor} {}", path.display()));
                Ok(())
            }
            editor => open::with(path, editor),
        };

        if let Err(e) = result {
            log::error!("failed to open config: {e}");
        }
    }

    /// Re-reads the config. A broken file keeps the current menu.
    fn reload(&mut self) {
        let settings = match Settings::load_from(&self.config_path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("reload failed, keeping current hosts: {e}");
                return;
            }
        };

        self.hosts = settings.hosts();
        self.dispatcher = Arc::new(dispatch::from_settings(&settings, Arc::clone(&self.gate)));
        self.settings = settings;
        self.tray.set_menu(build_menu(&self.hosts));

        log::info!("reloaded {} hosts", self.hosts.len());
    }
}

fn is_terminal_editor(editor: &str) -> bool {
    matches!(
        editor,
        "nano" | "vim" | "vi" | "nvim" | "emacs" | "micro" | "ne" | "joe" | "pico" | "ed"
    )
}

/// Winit side of the tray. On Linux the [`Shuttle`] lives on the GTK thread
/// and this only waits for the quit signal.
pub struct Application {
    shuttle: Option<Shuttle>,
}

impl Application {
    pub fn new(shuttle: Option<Shuttle>) -> Self {
        Self { shuttle }
    }
}

impl ApplicationHandler<UserEvent> for Application {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if cause == StartCause::Init {
            if let Some(shuttle) = &mut self.shuttle {
                shuttle.init();
            }

            #[cfg(target_os = "macos")]
            wake_macos_run_loop();
        }
    }

    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::MenuEvent(event) => {
                if let Some(shuttle) = &mut self.shuttle
                    && shuttle.handle_menu_event(event)
                {
                    event_loop.exit();
                }
            }
            UserEvent::Quit => event_loop.exit(),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        _event: winit::event::WindowEvent,
    ) {
    }
}

#[cfg(target_os = "macos")]
fn wake_macos_run_loop() {
    // Wake the run loop to ensure the tray icon appears immediately
    use objc2_core_foundation::CFRunLoop;
    if let Some(rl) = CFRunLoop::main() {
        rl.wake_up();
    }
}

#[cfg(target_os = "linux")]
pub fn run_gtk_thread(
    config_path: PathBuf,
    settings: Settings,
    runtime: Handle,
    quit_proxy: winit::event_loop::EventLoopProxy<UserEvent>,
) {
    // On Linux, winit doesn't use GTK but tray-icon requires it.
    // Run the tray in a dedicated GTK thread.
    std::thread::spawn(move || {
        if let Err(e) = gtk::init() {
            log::error!("failed to initialize GTK: {e}");
            let _ = quit_proxy.send_event(UserEvent::Quit);
            return;
        }

        let mut shuttle = Shuttle::new(config_path, settings, runtime);
        shuttle.init();

        // Poll for menu events in the GTK main loop
        let receiver = MenuEvent::receiver();
        gtk::glib::timeout_add_local(std::time::Duration::from_millis(50), move || {
            while let Ok(event) = receiver.try_recv() {
                if shuttle.handle_menu_event(event) {
                    let _ = quit_proxy.send_event(UserEvent::Quit);
                    gtk::main_quit();
                    return gtk::glib::ControlFlow::Break;
                }
            }
            gtk::glib::ControlFlow::Continue
        });

        gtk::main();
    });
}
