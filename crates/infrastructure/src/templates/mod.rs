//! HTML page rendering
//!
//! Pages are Tera templates compiled into the binary. Every template name
//! ends in `.html`, so all interpolated user text is HTML-escaped.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::PageRenderer;
//!
//! let pages = PageRenderer::new()?;
//! let html = pages.dashboard("Ada")?;
//! ```

use std::sync::Arc;

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering failed: {0}")]
    Render(String),

    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Auth form variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Signup,
}

impl AuthForm {
    const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Sign Up",
        }
    }

    const fn action(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
        }
    }

    const fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Create account",
        }
    }
}

/// A link rendered below a simple page's message
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub href: String,
    pub label: String,
}

impl PageLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

mod embedded {
    pub const BASE: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width,initial-scale=1">
  <title>{% block title %}Route Optimizer{% endblock title %}</title>
  {% block head %}{% endblock head %}
  <style>
    :root{--bg:#f7f8fb;--card:#ffffff;--muted:#5b6b79;--accent1:#7c3aed;--accent2:#16a34a;--fg:#071033}
    html,body{margin:0;font-family:Inter,Segoe UI,Helvetica,Arial;background:var(--bg);color:var(--fg)}
    .card{max-width:980px;margin:24px auto;background:var(--card);border-radius:14px;padding:20px;border:1px solid rgba(7,16,51,0.04);box-shadow:0 8px 30px rgba(2,6,23,0.04)}
    input.text{border-radius:12px;padding:12px 14px;border:1px solid rgba(7,16,51,0.1);font-size:15px;width:100%;box-sizing:border-box}
    button.action{background:linear-gradient(90deg,var(--accent1),var(--accent2));border:0;color:#fff;padding:12px 16px;border-radius:12px;cursor:pointer}
    .muted{color:var(--muted)}
    a{color:var(--accent1)}
  </style>
</head>
<body>
{% block body %}{% endblock body %}
</body>
</html>
"#;

    pub const AUTH: &str = r#"{% extends "base.html" %}
{% block title %}{{ title }}{% endblock title %}
{% block body %}
<div class="card" style="max-width:380px">
  <h2>{{ title }}</h2>
  <form method="post" action="{{ action | safe }}" style="display:flex;flex-direction:column;gap:10px">
    {% if show_name %}<input class="text" name="name" placeholder="Name (optional)">{% endif %}
    <input class="text" name="email" type="email" placeholder="Email" required>
    <input class="text" name="password" type="password" placeholder="Password" required>
    <button class="action" type="submit">{{ submit_label }}</button>
  </form>
  <p class="muted">
  {% if show_name %}Already have an account? <a href="/login">Login</a>
  {% else %}No account yet? <a href="/signup">Sign up</a>{% endif %}
  </p>
</div>
{% endblock body %}
"#;

    pub const PAGE: &str = r#"{% extends "base.html" %}
{% block title %}{{ title }}{% endblock title %}
{% block body %}
<div class="card">
  <h2>{{ title }}</h2>
  <p>{{ message }}</p>
  {% if link %}<p><a href="{{ link.href | safe }}">{{ link.label }}</a></p>{% endif %}
  <p><a href="/">Back home</a></p>
</div>
{% endblock body %}
"#;

    pub const DASHBOARD: &str = r#"{% extends "base.html" %}
{% block head %}<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">{% endblock head %}
{% block body %}
<header style="display:flex;justify-content:space-between;align-items:center;padding:10px 16px">
  <strong>Route Optimizer</strong>
  <nav class="muted">
    Signed in as <strong>{{ user_name }}</strong> |
    <a href="/profile">Profile</a> <a href="/settings">Settings</a> <a href="/logout">Log out</a>
  </nav>
</header>
<div class="card" style="display:flex;flex-direction:column;gap:14px">
  <form id="routeForm" autocomplete="off" style="display:flex;flex-direction:column;gap:8px;max-width:420px">
    <label class="muted">From:</label>
    <input class="text" name="from" placeholder="moi avenue, nairobi" required>
    <label class="muted">To:</label>
    <input class="text" name="to" placeholder="kenyatta avenue, nairobi" required>
    <div style="display:flex;gap:10px">
      <button type="submit" class="action">Find routes</button>
      <button type="button" class="action" id="clearBtn">Clear</button>
    </div>
  </form>
  <div id="map" style="height:52vh;border-radius:12px"></div>
  <div id="info" class="muted"></div>
</div>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script>
{% raw %}
const map = L.map('map').setView([20, 0], 2);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', { maxZoom: 19 }).addTo(map);
let layers = [];

function clearMap() {
  layers.forEach(l => map.removeLayer(l));
  layers = [];
  document.getElementById('info').textContent = '';
}

document.getElementById('clearBtn').addEventListener('click', () => {
  document.getElementById('routeForm').reset();
  clearMap();
});

document.getElementById('routeForm').addEventListener('submit', async (e) => {
  e.preventDefault();
  const fd = new FormData(e.target);
  const res = await fetch('/route', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ from: fd.get('from'), to: fd.get('to') })
  });
  if (!res.ok) {
    const err = await res.json().catch(() => ({ error: res.statusText }));
    return alert('Error: ' + err.error);
  }
  const data = await res.json();
  clearMap();
  const group = L.featureGroup().addTo(map);
  layers.push(group);
  data.candidates.forEach((r, i) => {
    const best = i === data.bestIndex;
    group.addLayer(L.geoJSON(r.geometry, {
      style: { color: best ? '#ff6b6b' : '#60a5fa', weight: best ? 6 : 3, opacity: best ? 0.95 : 0.7 }
    }));
  });
  for (const [label, p] of [['Origin', data.origin], ['Destination', data.destination]]) {
    const m = L.marker([p.lat, p.lon]).bindPopup(label + ': ' + p.displayName);
    group.addLayer(m);
  }
  if (group.getBounds().isValid()) map.fitBounds(group.getBounds(), { padding: [20, 20] });
  const info = document.getElementById('info');
  info.replaceChildren(...data.candidates.map((r, i) => {
    const div = document.createElement('div');
    div.textContent = (i === data.bestIndex ? 'BEST ' : '#') + ' Route ' + (i + 1) + ': '
      + (r.distance / 1000).toFixed(2) + ' km, ' + Math.round(r.duration / 60) + ' min';
    return div;
  }));
});
{% endraw %}
</script>
{% endblock body %}
"#;
}

/// Renders the server's HTML pages
#[derive(Clone)]
pub struct PageRenderer {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer").finish_non_exhaustive()
    }
}

impl PageRenderer {
    /// Compile the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_templates(vec![
            ("base.html", embedded::BASE),
            ("auth.html", embedded::AUTH),
            ("page.html", embedded::PAGE),
            ("dashboard.html", embedded::DASHBOARD),
        ])
        .map_err(|e| TemplateError::Compile(e.to_string()))?;

        debug!(count = tera.get_template_names().count(), "Compiled page templates");
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    fn render(&self, name: &str, context: &Context) -> Result<String, TemplateError> {
        self.tera.render(name, context).map_err(TemplateError::from)
    }

    /// Login or signup form
    pub fn auth_form(&self, form: AuthForm) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("title", form.title());
        ctx.insert("action", form.action());
        ctx.insert("submit_label", form.submit_label());
        ctx.insert("show_name", &(form == AuthForm::Signup));
        self.render("auth.html", &ctx)
    }

    /// Map dashboard for a signed-in user
    pub fn dashboard(&self, user_name: &str) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("user_name", user_name);
        self.render("dashboard.html", &ctx)
    }

    /// Titled page with a single message and an optional link
    pub fn simple_page(
        &self,
        title: &str,
        message: &str,
        link: Option<PageLink>,
    ) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("title", title);
        ctx.insert("message", message);
        ctx.insert("link", &link);
        self.render("page.html", &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> PageRenderer {
        PageRenderer::new().unwrap()
    }

    #[test]
    fn login_form_posts_to_login() {
        let html = pages().auth_form(AuthForm::Login).unwrap();
        assert!(html.contains(r#"action="/login""#));
        assert!(!html.contains(r#"name="name""#));
        assert!(html.contains("/signup"));
    }

    #[test]
    fn signup_form_asks_for_name() {
        let html = pages().auth_form(AuthForm::Signup).unwrap();
        assert!(html.contains(r#"action="/signup""#));
        assert!(html.contains(r#"name="name""#));
        assert!(html.contains("Create account"));
    }

    #[test]
    fn dashboard_escapes_user_name() {
        let html = pages().dashboard("<script>alert(1)</script>").unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn dashboard_keeps_script_braces() {
        let html = pages().dashboard("Ada").unwrap();
        assert!(html.contains("{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"));
        assert!(html.contains("data.bestIndex"));
        assert!(html.contains("leaflet"));
    }

    #[test]
    fn simple_page_with_link() {
        let html = pages()
            .simple_page(
                "Login",
                "Invalid credentials.",
                Some(PageLink::new("/login", "Try again")),
            )
            .unwrap();
        assert!(html.contains("Invalid credentials."));
        assert!(html.contains(r#"href="/login""#));
        assert!(html.contains("Back home"));
    }

    #[test]
    fn simple_page_escapes_message() {
        let html = pages()
            .simple_page("Profile", "Profile management for <b>Eve</b>", None)
            .unwrap();
        assert!(html.contains("&lt;b&gt;Eve&lt;&#x2F;b&gt;"));
    }

    #[test]
    fn missing_template_is_not_found() {
        let err = pages().render("nope.html", &Context::new()).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }
}
