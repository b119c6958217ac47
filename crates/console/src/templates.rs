//! Template engine setup and HTML templates.

use once_cell::sync::Lazy;
use tera::{Context, Tera};

/// Global template engine instance with embedded templates.
pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();

    // Embedded in the binary; no template files are needed at runtime.
    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("index.html", INDEX_TEMPLATE),
    ])
    .expect("Failed to load templates");

    tera
});

/// Render a template with context
pub fn render(template: &str, context: &Context) -> Result<String, tera::Error> {
    TEMPLATES.render(template, context)
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Catalog Manager{% endblock %}</title>
    <style>
        :root {
            --bg: #141414;
            --panel: #1f1f1f;
            --foreground: #f5f5f5;
            --muted: rgba(245, 245, 245, 0.6);
            --border: #333;
            --accent: #e50914;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--foreground);
            line-height: 1.6;
        }
        main { max-width: 960px; margin: 0 auto; padding: 32px 24px; }
        h1 { font-size: 28px; margin-bottom: 24px; }
        h2 { font-size: 18px; margin-bottom: 12px; }
        nav { display: flex; gap: 8px; margin-bottom: 24px; }
        nav a {
            color: var(--foreground);
            text-decoration: none;
            padding: 6px 14px;
            border: 1px solid var(--border);
            border-radius: 6px;
        }
        nav a.active { border-color: var(--accent); }
        .panel {
            background: var(--panel);
            border: 1px solid var(--border);
            border-radius: 8px;
            padding: 20px;
            margin-bottom: 24px;
        }
        label { display: block; margin: 12px 0 4px; color: var(--muted); font-size: 14px; }
        input, textarea {
            width: 100%;
            padding: 8px;
            background: var(--bg);
            color: var(--foreground);
            border: 1px solid var(--border);
            border-radius: 4px;
        }
        button {
            margin-top: 16px;
            padding: 8px 20px;
            background: var(--accent);
            color: #fff;
            border: none;
            border-radius: 4px;
            cursor: pointer;
        }
        pre {
            background: var(--bg);
            padding: 12px;
            border-radius: 4px;
            overflow-x: auto;
            font-size: 13px;
        }
        details { margin-top: 8px; }
        summary { cursor: pointer; }
        .flash { padding: 12px 16px; border-radius: 6px; margin-bottom: 24px; }
        .flash-success { background: #123d1f; }
        .flash-error { background: #4a1114; }
        .flash-info { background: #10304a; }
        footer { color: var(--muted); font-size: 13px; border-top: 1px solid var(--border); padding-top: 16px; }
    </style>
</head>
<body>
<main>
    <h1>Catalog Manager</h1>
    {% block content %}{% endblock %}
    <footer>
        Tip: the console talks to the catalog API at <code>{{ api_base_url }}</code>.
        Set <code>CATALOG_API_BASE_URL</code> to point it elsewhere.
    </footer>
</main>
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<nav>
    <a href="/?tab=upload" {% if tab == "upload" %}class="active"{% endif %}>Upload</a>
    <a href="/?tab=save" {% if tab == "save" %}class="active"{% endif %}>Save</a>
    <a href="/?tab=list" {% if tab == "list" %}class="active"{% endif %}>List</a>
    <a href="/?tab=search" {% if tab == "search" %}class="active"{% endif %}>Search</a>
</nav>

{% if flash %}
<div class="flash flash-{{ flash.level }}">{{ flash.message }}</div>
{% endif %}

{% if tab == "upload" %}
<section class="panel" id="upload">
    <h2>Upload Catalog File</h2>
    <form method="post" action="/upload" enctype="multipart/form-data">
        <label for="file">Choose a file ({{ allowed_extensions | join(sep=", ") }})</label>
        <input type="file" id="file" name="file" accept="{% for ext in allowed_extensions %}.{{ ext }}{% if not loop.last %},{% endif %}{% endfor %}">
        <label for="filename">File name</label>
        <input type="text" id="filename" name="filename">
        <button type="submit">Send File</button>
    </form>
</section>
{% elif tab == "save" %}
<section class="panel" id="save">
    <h2>Save New Catalog</h2>
    <form method="post" action="/save">
        <label for="id">Catalog ID</label>
        <input type="text" id="id" name="id">
        <label for="name">Name</label>
        <input type="text" id="name" name="name">
        <label for="description">Description</label>
        <textarea id="description" name="description" rows="4"></textarea>
        <button type="submit">Save Catalog</button>
    </form>
</section>
{% elif tab == "list" %}
<section class="panel" id="list">
    <h2>Available Catalogs</h2>
    <form method="get" action="/list">
        <button type="submit">Load Catalogs</button>
    </form>
    {% if catalogs %}
    {% for catalog in catalogs %}
    <details>
        <summary>{{ catalog.label }}</summary>
        <pre>{{ catalog.json }}</pre>
    </details>
    {% endfor %}
    {% endif %}
</section>
{% elif tab == "search" %}
<section class="panel" id="search">
    <h2>Find Catalog</h2>
    <form method="get" action="/search">
        <label for="search-id">Catalog ID to search</label>
        <input type="text" id="search-id" name="id" value="{{ search_id }}">
        <button type="submit">Search</button>
    </form>
    {% if found %}
    <pre>{{ found.json }}</pre>
    {% endif %}
</section>
{% endif %}
{% endblock %}"##;
