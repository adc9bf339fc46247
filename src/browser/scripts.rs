//! Page-side JavaScript for each [`DomQuery`].
//!
//! Every script is an expression that returns `JSON.stringify(...)`, so the
//! result always crosses the protocol as a string (including `null`).

use crate::page::{DomQuery, ScrollTarget};

const DESCRIBE_ELEMENT: &str = r#"
  const describe = (el) => {
    const parent = el.parentElement;
    let sameTagIndex = 0;
    let sameTagCount = 0;
    if (parent) {
      const siblings = Array.from(parent.children).filter((ch) => ch.tagName === el.tagName);
      sameTagCount = siblings.length;
      sameTagIndex = siblings.indexOf(el) + 1;
    }
    return {
      tag: (el.tagName || "").toLowerCase(),
      id: el.id || "",
      classes: Array.from(el.classList || []),
      hasParent: !!parent,
      sameTagIndex,
      sameTagCount,
    };
  };
"#;

/// Renders a Rust string as a JavaScript string literal.
fn js_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

pub fn for_query(query: &DomQuery) -> String {
    match query {
        DomQuery::Meta => META.to_string(),
        DomQuery::Assets => ASSETS.to_string(),
        DomQuery::StyleInventory { sample } => style_inventory(*sample),
        DomQuery::GlobalStyles => GLOBAL_STYLES.to_string(),
        DomQuery::Candidates { card_cap } => candidates(*card_cap),
        DomQuery::StyleSnapshot { selector, text_len } => style_snapshot(selector, *text_len),
        DomQuery::Position { selector } => position(selector),
        DomQuery::Reveal { selector } => reveal(selector),
        DomQuery::RevealCandidates { cap } => reveal_candidates(*cap),
        DomQuery::Layout { grid_sample } => layout(*grid_sample),
    }
}

const META: &str = r#"(() => {
  const content = (sel) => {
    const el = document.querySelector(sel);
    return el ? el.getAttribute("content") || "" : "";
  };
  return JSON.stringify({
    title: document.title || "",
    description: content('meta[name="description"]'),
    viewport: content('meta[name="viewport"]'),
    htmlLang: document.documentElement.lang || "",
  });
})()"#;

const ASSETS: &str = r#"(() => {
  const images = Array.from(document.images || []).map((i) => ({ src: i.currentSrc || i.src || "", alt: i.alt || "" }));
  const scripts = Array.from(document.scripts || []).map((s) => ({ src: s.src || "", async: !!s.async, defer: !!s.defer }));
  const stylesheets = Array.from(document.styleSheets || []).map((ss) => ({
    href: ss.href || "inline",
    owner: ss.ownerNode ? ss.ownerNode.tagName : "unknown",
  }));
  return JSON.stringify({ images, scripts, stylesheets });
})()"#;

fn style_inventory(sample: usize) -> String {
    format!(
        r#"(() => {{
  const root = getComputedStyle(document.documentElement);
  const cssVariables = [];
  for (let i = 0; i < root.length; i++) {{
    const name = root[i];
    if (name.startsWith("--")) cssVariables.push([name, root.getPropertyValue(name).trim()]);
  }}
  const colors = new Set();
  const backgroundColors = new Set();
  const fonts = new Set();
  for (const el of Array.from(document.querySelectorAll("*")).slice(0, {sample})) {{
    try {{
      const cs = getComputedStyle(el);
      if (cs.color) colors.add(cs.color);
      if (cs.backgroundColor && cs.backgroundColor !== "rgba(0, 0, 0, 0)" && cs.backgroundColor !== "transparent") backgroundColors.add(cs.backgroundColor);
      if (cs.fontFamily) fonts.add(cs.fontFamily);
    }} catch (e) {{}}
  }}
  return JSON.stringify({{
    cssVariables,
    colors: Array.from(colors),
    backgroundColors: Array.from(backgroundColors),
    fonts: Array.from(fonts),
  }});
}})()"#
    )
}

const GLOBAL_STYLES: &str = r#"(() => {
  const cs = getComputedStyle(document.body);
  return JSON.stringify({
    bodyBg: cs.backgroundColor,
    bodyColor: cs.color,
    fontFamily: cs.fontFamily,
    fontSize: cs.fontSize,
    lineHeight: cs.lineHeight,
    transition: cs.transition || null,
  });
})()"#;

fn candidates(card_cap: usize) -> String {
    format!(
        r#"(() => {{
{DESCRIBE_ELEMENT}
  const all = (q) => Array.from(document.querySelectorAll(q));
  return JSON.stringify({{
    buttons: all("button, input[type=button], input[type=submit], .btn, [role='button']").map(describe),
    links: all("a").map(describe),
    inputs: all("input, textarea, select").map(describe),
    navs: all("nav, header").map(describe),
    cards: all(".card, [class*='card'], .product, .post, article").slice(0, {card_cap}).map(describe),
  }});
}})()"#
    )
}

fn style_snapshot(selector: &str, text_len: usize) -> String {
    format!(
        r#"((selector) => {{
  const el = document.querySelector(selector);
  if (!el) return JSON.stringify(null);
  const cs = getComputedStyle(el);
  return JSON.stringify({{
    selector,
    tag: el.tagName,
    classList: Array.from(el.classList || []),
    id: el.id || null,
    text: el.innerText ? Array.from(el.innerText.trim()).slice(0, {text_len}).join("") : "",
    computed: {{
      color: cs.color,
      backgroundColor: cs.backgroundColor,
      borderColor: cs.borderColor,
      borderRadius: cs.borderRadius,
      boxShadow: cs.boxShadow,
      fontFamily: cs.fontFamily,
      fontSize: cs.fontSize,
      fontWeight: cs.fontWeight,
      lineHeight: cs.lineHeight,
      padding: cs.padding,
      margin: cs.margin,
      display: cs.display,
      position: cs.position,
      top: cs.top,
      left: cs.left,
      transition: cs.transition,
      transitionDuration: cs.transitionDuration,
      animationName: cs.animationName,
      animationDuration: cs.animationDuration,
      cursor: cs.cursor,
    }},
    rect: el.getBoundingClientRect().toJSON(),
  }});
}})({})"#,
        js_str(selector)
    )
}

fn position(selector: &str) -> String {
    format!(
        r#"((selector) => {{
  const el = document.querySelector(selector);
  if (!el) return JSON.stringify(null);
  return JSON.stringify({{
    top: el.getBoundingClientRect().top,
    position: getComputedStyle(el).position,
    classList: Array.from(el.classList || []),
  }});
}})({})"#,
        js_str(selector)
    )
}

fn reveal(selector: &str) -> String {
    format!(
        r#"((selector) => {{
  const el = document.querySelector(selector);
  if (!el) return JSON.stringify(null);
  const cs = getComputedStyle(el);
  return JSON.stringify({{
    opacity: cs.opacity,
    transform: cs.transform,
    visibility: cs.visibility,
    top: el.getBoundingClientRect().top,
  }});
}})({})"#,
        js_str(selector)
    )
}

fn reveal_candidates(cap: usize) -> String {
    format!(
        r#"(() => {{
{DESCRIBE_ELEMENT}
  const els = Array.from(document.querySelectorAll("section, .section, [data-aos], [data-animate], .animate")).slice(0, {cap});
  return JSON.stringify(els.map(describe));
}})()"#
    )
}

fn layout(grid_sample: usize) -> String {
    format!(
        r#"(() => {{
  const header = document.querySelector("header") || document.querySelector("nav") || document.querySelector("main");
  const grids = Array.from(document.querySelectorAll('.row, .grid, [class*="columns"], .product-grid'))
    .slice(0, {grid_sample})
    .map((g) => ({{ class: typeof g.className === "string" ? g.className : "", items: g.children.length }}));
  const hamburger = !!document.querySelector(".hamburger, .menu-toggle, .mobile-toggle, .navbar-toggler");
  return JSON.stringify({{
    headerRect: header ? header.getBoundingClientRect().toJSON() : null,
    grids,
    hamburger,
    innerWidth: window.innerWidth,
    innerHeight: window.innerHeight,
  }});
}})()"#
    )
}

pub fn scroll(target: &ScrollTarget) -> String {
    match target {
        ScrollTarget::Top => {
            r#"(() => { window.scrollTo({ top: 0, behavior: "instant" }); return JSON.stringify(true); })()"#
                .to_string()
        }
        ScrollTarget::Fraction(fraction) => format!(
            r#"(() => {{ window.scrollTo({{ top: document.body.scrollHeight * {fraction}, behavior: "instant" }}); return JSON.stringify(true); }})()"#
        ),
        ScrollTarget::IntoView(selector) => format!(
            r#"((selector) => {{
  const el = document.querySelector(selector);
  if (!el) return JSON.stringify(false);
  el.scrollIntoView({{ block: "center", behavior: "instant" }});
  return JSON.stringify(true);
}})({})"#,
            js_str(selector)
        ),
    }
}

/// Dispatches a synthetic bubbling mouse event of the given type.
pub fn dispatch_mouse_event(selector: &str, event: &str) -> String {
    format!(
        r#"((selector, type) => {{
  const el = document.querySelector(selector);
  if (!el) return JSON.stringify(false);
  el.dispatchEvent(new MouseEvent(type, {{ bubbles: true, cancelable: true, composed: true, view: window }}));
  return JSON.stringify(true);
}})({}, {})"#,
        js_str(selector),
        js_str(event)
    )
}
