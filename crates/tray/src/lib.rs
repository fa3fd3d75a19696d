use catalog::{Host, HostId, Hosts};
use image::load_from_memory;
use tray_icon::menu::{IsMenuItem, MenuItem, PredefinedMenuItem, Submenu};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

pub use tray_icon::menu::{Menu, MenuEvent};

pub const MENU_ID_CONFIGURE: &str = "configure";
pub const MENU_ID_RELOAD: &str = "reload";
pub const MENU_ID_QUIT: &str = "quit";

const ICON_BYTES: &[u8] = include_bytes!("../../../assets/icon.png");

#[derive(Default)]
pub struct Tray {
    icon: Option<TrayIcon>,
}

impl Tray {
    pub fn new() -> Self {
        Self { icon: None }
    }

    /// # Panics
    ///
    /// Panics if the embedded icon cannot be decoded or the tray icon cannot
    /// be created.
    pub fn init(&mut self, menu: Menu) {
        self.icon = Some(
            TrayIconBuilder::new()
                .with_menu(Box::new(menu))
                .with_tooltip("shuttle")
                .with_icon(load_icon())
                .build()
                .expect("Failed to create tray icon"),
        );
    }

    pub fn set_menu(&self, menu: Menu) {
        if let Some(icon) = &self.icon {
            icon.set_menu(Some(Box::new(menu)));
        }
    }

    pub fn destroy(&mut self) {
        self.icon.take();
    }
}

fn load_icon() -> Icon {
    let img = load_from_memory(ICON_BYTES)
        .expect("Failed to load icon")
        .into_rgba8();
    let (width, height) = img.dimensions();
    Icon::from_rgba(img.into_raw(), width, height).expect("Failed to create icon")
}

/// Menu layout derived from host paths.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Item { id: HostId, label: String },
    Submenu { name: String, entries: Vec<Entry> },
}

/// Host name, with its address when the command has one.
fn label(host: &Host) -> String {
    match &host.ip {
        Some(ip) => format!("{}  ({ip})", host.name),
        None => host.name.clone(),
    }
}

/// Nests hosts into submenus by path. Consecutive hosts sharing a path
/// segment at `depth` share a submenu, so the menu mirrors document order.
fn layout(hosts: &[(HostId, &Host)], depth: usize) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut rest = hosts;

    while let Some(((id, host), tail)) = rest.split_first() {
        match host.path.get(depth) {
            None => {
                entries.push(Entry::Item {
                    id: *id,
                    label: label(host),
                });
                rest = tail;
            }
            Some(name) => {
                let len = rest
                    .iter()
                    .take_while(|(_, h)| h.path.get(depth) == Some(name))
                    .count();
                entries.push(Entry::Submenu {
                    name: name.clone(),
                    entries: layout(&rest[..len], depth + 1),
                });
                rest = &rest[len..];
            }
        }
    }

    entries
}

fn append_entries(
    entries: &[Entry],
    append: &dyn Fn(&dyn IsMenuItem) -> tray_icon::menu::Result<()>,
) {
    for entry in entries {
        let result = match entry {
            Entry::Item { id, label } => {
                append(&MenuItem::with_id(id.to_string(), label, true, None))
            }
            Entry::Submenu { name, entries } => {
                let submenu = Submenu::new(name, true);
                append_entries(entries, &|item| submenu.append(item));
                append(&submenu)
            }
        };

        if let Err(e) = result {
            log::warn!("failed to append menu entry: {e}");
        }
    }
}

/// Builds the tray menu: hosts first, then Configure, Reload and Quit.
///
/// Host items use [`HostId`] display strings as menu IDs.
pub fn build_menu(hosts: &Hosts) -> Menu {
    let menu = Menu::new();
    let flat: Vec<_> = hosts.iter().collect();

    append_entries(&layout(&flat, 0), &|item| menu.append(item));

    let append = |item: &dyn IsMenuItem| {
        if let Err(e) = menu.append(item) {
            log::warn!("failed to append menu entry: {e}");
        }
    };

    if !hosts.is_empty() {
        append(&PredefinedMenuItem::separator());
    }
    append(&MenuItem::with_id(
        MENU_ID_CONFIGURE,
        "Configure",
        true,
        None,
    ));
    append(&MenuItem::with_id(MENU_ID_RELOAD, "Reload", true, None));
    append(&MenuItem::with_id(MENU_ID_QUIT, "Quit", true, None));

    menu
}
