use super::escape;

pub struct SidebarTab {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub href: &'static str,
}

pub const TABS: &[SidebarTab] = &[SidebarTab {
    id: "employee-directory",
    label: "Employee Directory",
    icon: "👥",
    href: "/",
}];

impl SidebarTab {
    pub fn is_active(&self, path: &str) -> bool {
        self.href == path
    }
}

/// Colors used by the page. Passed to the shell instead of living in a
/// global stylesheet.
#[derive(Clone, Debug)]
pub struct Theme {
    pub page: &'static str,
    pub sidebar: &'static str,
    pub border: &'static str,
    pub surface: &'static str,
    pub surface_raised: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub danger: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            page: "#1c1c1c",
            sidebar: "#0f0f0f",
            border: "#2a2a2a",
            surface: "#242424",
            surface_raised: "#2a2a2a",
            accent: "#3ecf8e",
            text: "#f3f4f6",
            muted: "#9ca3af",
            danger: "#f87171",
        }
    }
}

impl Theme {
    fn stylesheet(&self) -> String {
        format!(
            ":root{{--page:{page};--sidebar:{sidebar};--border:{border};--surface:{surface};\
--raised:{raised};--accent:{accent};--text:{text};--muted:{muted};--danger:{danger}}}\
*{{box-sizing:border-box}}\
body{{margin:0;background:var(--page);color:var(--text);font-family:Inter,system-ui,sans-serif}}\
.layout{{display:flex;height:100vh}}\
.sidebar{{width:200px;position:fixed;inset:0 auto 0 0;display:flex;flex-direction:column;\
background:var(--sidebar);border-right:1px solid var(--border)}}\
.sidebar-header,.sidebar-footer{{height:64px;display:flex;align-items:center;padding:0 16px}}\
.sidebar-header{{border-bottom:1px solid var(--border);font-weight:600}}\
.sidebar-footer{{border-top:1px solid var(--border);font-size:12px;color:var(--muted)}}\
.nav{{flex:1;list-style:none;margin:0;padding:16px 8px}}\
.nav a{{display:flex;gap:12px;align-items:center;padding:10px 12px;border-radius:8px;\
color:var(--muted);text-decoration:none;font-size:14px}}\
.nav a:hover{{color:var(--text);background:var(--raised)}}\
.nav a.active{{color:var(--accent);background:color-mix(in srgb,var(--accent) 10%,transparent)}}\
.content{{flex:1;margin-left:200px;overflow:auto;padding:32px}}\
.directory{{max-width:80rem;margin:0 auto}}\
.directory h1{{font-size:2.25rem;margin:0 0 8px}}\
.count,.muted{{color:var(--muted)}}\
.banner-error{{border:1px solid #991b1b;background:rgba(127,29,29,.2);color:var(--danger);\
padding:12px 16px;border-radius:8px;margin-bottom:16px}}\
.banner-error p{{margin:0}}.banner-title{{font-weight:600}}\
.table-wrap{{background:var(--surface);border:1px solid var(--border);border-radius:8px;overflow:auto}}\
table{{width:100%;table-layout:fixed;border-collapse:collapse}}\
th{{background:var(--raised);color:var(--muted);font-size:12px;text-transform:uppercase;\
text-align:left;padding:12px 24px;position:sticky;top:0}}\
td{{padding:16px 24px;border-top:1px solid var(--border);font-size:14px;overflow:hidden;text-overflow:ellipsis}}\
tr:hover td{{background:var(--raised)}}\
.employee{{display:flex;align-items:center;gap:12px}}\
.avatar{{width:40px;height:40px;flex:none;border-radius:50%;display:flex;align-items:center;\
justify-content:center;font-weight:700;color:var(--accent);\
background:color-mix(in srgb,var(--accent) 20%,transparent)}}\
td a{{color:var(--accent);text-decoration:none}}td a:hover{{text-decoration:underline}}\
.empty{{text-align:center;color:var(--muted);padding:64px 0}}",
            page = self.page,
            sidebar = self.sidebar,
            border = self.border,
            surface = self.surface,
            raised = self.surface_raised,
            accent = self.accent,
            text = self.text,
            muted = self.muted,
            danger = self.danger,
        )
    }
}

/// Static frame around every page: sidebar navigation plus the main column.
#[derive(Clone, Debug)]
pub struct Shell {
    title: String,
    theme: Theme,
}

impl Shell {
    pub fn new(title: impl Into<String>, theme: Theme) -> Self {
        Self {
            title: title.into(),
            theme,
        }
    }

    /// Wrap an already-rendered body. `active_path` is the request path and
    /// decides which tab is highlighted.
    pub fn render(&self, active_path: &str, body: &str) -> String {
        format!(
            "<!doctype html><html lang=\"en\" class=\"dark\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title><style>{style}</style></head><body><div class=\"layout\">\
<aside class=\"sidebar\"><div class=\"sidebar-header\">Dashboard</div>\
<nav><ul class=\"nav\">{tabs}</ul></nav>\
<div class=\"sidebar-footer\">v{version}</div></aside>\
<main class=\"content\">{body}</main></div></body></html>",
            title = escape(&self.title),
            style = self.theme.stylesheet(),
            tabs = render_tabs(active_path),
            version = env!("CARGO_PKG_VERSION"),
        )
    }
}

fn render_tabs(active_path: &str) -> String {
    TABS.iter()
        .map(|tab| {
            let class = if tab.is_active(active_path) {
                " class=\"active\" aria-current=\"page\""
            } else {
                ""
            };
            format!(
                "<li data-tab=\"{id}\"><a href=\"{href}\"{class}><span>{icon}</span><span>{label}</span></a></li>",
                id = tab.id,
                href = tab.href,
                icon = tab.icon,
                label = escape(tab.label),
            )
        })
        .collect()
}
