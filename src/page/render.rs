//! HTML page rendering.
//!
//! The page is assembled section by section into a `String`, the same way
//! a report generator would build markdown. All identity values are
//! HTML-escaped on the way in; values that also land inside inline
//! JavaScript string literals get JS escaping first.

use crate::geo::{CountryCode, ALL_COUNTRIES};
use crate::models::Identity;
use html_escape::encode_text;

/// Clipboard icon shared by all copy buttons.
const COPY_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5 text-gray-500" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M8 16H6a2 2 0 01-2-2V6a2 2 0 012-2h8a2 2 0 012 2v2m-6 12h8a2 2 0 002-2v-8a2 2 0 00-2-2h-8a2 2 0 00-2 2v8a2 2 0 002 2z" /></svg>"#;

/// Generate the complete identity page.
pub fn render_page(identity: &Identity) -> String {
    let mut page = String::new();

    page.push_str(&page_head());
    page.push_str(
        r#"<body class="flex flex-col items-center justify-center min-h-screen p-4 sm:p-6 lg:p-8">

  <div id="copied-toast" class="fixed top-5 bg-green-500 text-white py-2 px-5 rounded-lg shadow-lg text-sm transition-transform duration-300 transform -translate-y-20">
    Copied!
  </div>

  <div class="w-full max-w-4xl mx-auto">
    <header class="text-center mb-8">
      <h1 class="text-3xl sm:text-4xl font-bold text-gray-800">Identikit</h1>
    </header>

    <main class="grid grid-cols-1 lg:grid-cols-2 gap-8">
"#,
    );

    page.push_str(&identity_card(identity));
    page.push_str(&saved_pane());

    page.push_str("    </main>\n\n");
    page.push_str(&page_footer(identity));
    page.push_str("  </div>\n\n");
    page.push_str(PAGE_SCRIPT);
    page.push_str("</body>\n</html>\n");

    page
}

/// Generate the generic error page shown by the catch-all handler.
pub fn render_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Identikit</title></head>
<body>
  <div style="font-family: sans-serif; text-align: center; padding: 40px;">
    <h1>Oops! Something went wrong.</h1>
    <p>We couldn't generate an identity right now. Please try refreshing the page.</p>
    <p style="color: grey; font-size: 0.8em;">Error: {}</p>
  </div>
</body>
</html>
"#,
        encode_text(message)
    )
}

/// Document head: meta, fonts, Tailwind, embedded styles.
fn page_head() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Identikit</title>
  <script src="https://cdn.tailwindcss.com"></script>
  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;700&display=swap" rel="stylesheet">
  <style>
    body {
      font-family: 'Inter', sans-serif;
      background-color: #f7fafc;
    }
    ::-webkit-scrollbar { width: 8px; }
    ::-webkit-scrollbar-track { background: #f1f1f1; }
    ::-webkit-scrollbar-thumb { background: #d1d5db; border-radius: 10px; }
    ::-webkit-scrollbar-thumb:hover { background: #9ca3af; }
    .fade-in { animation: fadeIn 0.5s ease-in-out; }
    @keyframes fadeIn {
      from { opacity: 0; transform: translateY(-10px); }
      to { opacity: 1; transform: translateY(0); }
    }
    .btn-press:active { transform: scale(0.95); transition: transform 0.1s; }
  </style>
</head>
"#
    .to_string()
}

/// The left card: country selector, identity fields, map, action buttons.
fn identity_card(identity: &Identity) -> String {
    let mut card = String::new();

    card.push_str(
        r#"      <div class="bg-white p-6 rounded-2xl shadow-lg flex flex-col gap-6 fade-in">
        <div>
          <label for="country" class="block text-sm font-medium text-gray-600 mb-2">Select Country</label>
          <select id="country" onchange="changeCountry(this.value)" class="w-full bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block p-2.5">
"#,
    );
    card.push_str(&country_options(identity.country));
    card.push_str("          </select>\n        </div>\n\n        <div class=\"space-y-4\">\n");

    card.push_str(&detail_row("Name", "info-name", &identity.name, &identity.name));
    card.push_str(&detail_row(
        "Gender",
        "info-gender",
        &identity.gender.to_string(),
        &identity.gender.to_string(),
    ));
    card.push_str(&detail_row(
        "Phone",
        "info-phone",
        &identity.phone,
        &bare_phone(&identity.phone),
    ));
    card.push_str(&detail_row(
        "Address",
        "info-address",
        &identity.address,
        &identity.address,
    ));

    card.push_str("        </div>\n\n");
    card.push_str(
        r#"        <iframe id="map-frame" class="w-full h-64 rounded-xl"></iframe>

        <div class="grid grid-cols-2 gap-4">
          <button onclick="window.location.href = window.location.pathname + '?country=' + document.getElementById('country').value" class="w-full py-3 px-4 bg-blue-600 text-white font-semibold rounded-lg shadow-md hover:bg-blue-700 focus:outline-none focus:ring-2 focus:ring-blue-400 focus:ring-opacity-75 transition-all btn-press">Get Another Identity</button>
          <button onclick="saveIdentity()" class="w-full py-3 px-4 bg-green-500 text-white font-semibold rounded-lg shadow-md hover:bg-green-600 focus:outline-none focus:ring-2 focus:ring-green-400 focus:ring-opacity-75 transition-all btn-press">Save Identity</button>
        </div>
      </div>

"#,
    );

    card
}

/// One labeled field with a copy button.
fn detail_row(label: &str, span_id: &str, display_value: &str, copy_value: &str) -> String {
    format!(
        r#"          <div class="flex items-center justify-between p-3 bg-gray-50 rounded-lg">
            <span class="text-gray-500">{}</span>
            <span id="{}" class="font-semibold text-gray-800">{}</span>
            <button onclick="copyToClipboard('{}', this)" class="p-2 rounded-full hover:bg-gray-200 transition-colors flex-shrink-0 btn-press">
              {}
            </button>
          </div>
"#,
        encode_text(label),
        span_id,
        encode_text(display_value),
        js_escape(copy_value),
        COPY_ICON,
    )
}

/// Selector options with the current country marked.
fn country_options(selected: CountryCode) -> String {
    let mut options = String::new();

    for country in ALL_COUNTRIES {
        let marker = if *country == selected { " selected" } else { "" };
        options.push_str(&format!(
            "            <option value=\"{}\"{}>{}</option>\n",
            country.as_str(),
            marker,
            country.display_name()
        ));
    }

    options
}

/// The right card where the client script renders saved identities.
fn saved_pane() -> String {
    r#"      <div class="bg-white p-6 rounded-2xl shadow-lg fade-in" style="animation-delay: 0.1s;">
        <h2 class="text-xl font-bold text-gray-800 mb-4">Saved Identities</h2>
        <div id="savedAddressesContainer" class="space-y-3 max-h-[600px] overflow-y-auto pr-2">
        </div>
      </div>
"#
    .to_string()
}

/// Footer with the project link and the generation timestamp.
fn page_footer(identity: &Identity) -> String {
    format!(
        r#"    <footer class="text-center mt-8">
      <a href="https://github.com/identikit/identikit" target="_blank" class="text-sm text-gray-500 hover:text-gray-700 transition-colors">GitHub</a>
      <p class="text-xs text-gray-400 mt-1">Generated at {}</p>
    </footer>
"#,
        identity.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// Escape a value for a single-quoted JavaScript string literal inside an
/// HTML attribute. HTML-sensitive characters become JS unicode escapes so
/// the result needs no further attribute escaping.
fn js_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\u0027"),
            '"' => out.push_str("\\u0022"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }

    out
}

/// Strip formatting from a phone number for clipboard use.
fn bare_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Client-side behavior: clipboard, country switching, and the
/// localStorage-backed favorites list under the `savedAddresses` key.
const PAGE_SCRIPT: &str = r#"  <script>
    function copyToClipboard(text, button) {
      navigator.clipboard.writeText(text).then(() => {
        const toast = document.getElementById('copied-toast');
        toast.style.transform = 'translateY(0)';
        setTimeout(() => {
          toast.style.transform = 'translateY(-5rem)';
        }, 2000);

        if (button) {
          const originalIcon = button.innerHTML;
          button.innerHTML = '<svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5 text-green-500" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7" /></svg>';
          setTimeout(() => {
            button.innerHTML = originalIcon;
          }, 1500);
        }
      }).catch(err => {
        console.error('Could not copy text: ', err);
      });
    }

    function changeCountry(country) {
      window.location.href = window.location.pathname + '?country=' + country;
    }

    function saveIdentity() {
      const note = prompt('Please enter a note (optional)', '');
      try {
        const saved = JSON.parse(localStorage.getItem('savedAddresses') || '[]');

        const entry = {
          note: note || 'No notes',
          name: document.getElementById('info-name').textContent,
          gender: document.getElementById('info-gender').textContent,
          phone: document.getElementById('info-phone').textContent,
          address: document.getElementById('info-address').textContent
        };

        saved.unshift(entry);
        localStorage.setItem('savedAddresses', JSON.stringify(saved));
        renderSavedIdentities();
      } catch (e) {
        console.error('Could not save identity to localStorage', e);
        alert('Error: Could not save identity. Your browser might be blocking localStorage.');
      }
    }

    function renderSavedIdentities() {
      try {
        const saved = JSON.parse(localStorage.getItem('savedAddresses') || '[]');
        const container = document.getElementById('savedAddressesContainer');
        container.innerHTML = '';

        if (saved.length === 0) {
          container.innerHTML = '<p class="text-center text-gray-400 mt-10">No saved identities yet.</p>';
          return;
        }

        const esc = (s) => s.replace(/</g, '&lt;').replace(/>/g, '&gt;');

        saved.forEach((entry, index) => {
          const card = document.createElement('div');
          card.className = 'p-4 border border-gray-200 rounded-lg hover:shadow-md transition-shadow duration-300';
          card.innerHTML = `
            <div class="flex justify-between items-start">
              <p class="font-bold text-gray-700">${esc(entry.note)}</p>
              <button onclick="deleteSavedIdentity(${index})" class="text-gray-400 hover:text-red-500 transition-colors btn-press">
                <svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12" /></svg>
              </button>
            </div>
            <div class="mt-2 text-sm text-gray-600 space-y-1">
              <p><span class="font-medium">Name:</span> ${esc(entry.name)}</p>
              <p><span class="font-medium">Phone:</span> ${esc(entry.phone)}</p>
              <p><span class="font-medium">Address:</span> ${esc(entry.address)}</p>
            </div>
          `;
          container.appendChild(card);
        });
      } catch (e) {
        console.error('Could not render saved identities from localStorage', e);
      }
    }

    function deleteSavedIdentity(index) {
      try {
        const saved = JSON.parse(localStorage.getItem('savedAddresses') || '[]');
        saved.splice(index, 1);
        localStorage.setItem('savedAddresses', JSON.stringify(saved));
        renderSavedIdentities();
      } catch (e) {
        console.error('Could not delete identity from localStorage', e);
      }
    }

    window.onload = function() {
      const address = document.getElementById('info-address').textContent;
      document.getElementById('map-frame').src =
        'https://www.google.com/maps?q=' + encodeURIComponent(address) + '&output=embed';
      renderSavedIdentities();
    };
  </script>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::Utc;

    fn test_identity() -> Identity {
        Identity {
            name: "Mia Schneider".to_string(),
            gender: Gender::Female,
            phone: "+41 76 123 45 67".to_string(),
            address: "7 Bahnhofstrasse, Uster, 8610, CH".to_string(),
            country: CountryCode::Ch,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_page_contains_identity_fields() {
        let page = render_page(&test_identity());

        assert!(page.contains("Mia Schneider"));
        assert!(page.contains("Female"));
        assert!(page.contains("+41 76 123 45 67"));
        assert!(page.contains("7 Bahnhofstrasse, Uster, 8610, CH"));
    }

    #[test]
    fn test_page_marks_selected_country() {
        let page = render_page(&test_identity());
        assert!(page.contains("<option value=\"CH\" selected>Switzerland</option>"));
        assert!(page.contains("<option value=\"AU\">Australia</option>"));
    }

    #[test]
    fn test_page_references_saved_store_key() {
        let page = render_page(&test_identity());
        assert!(page.contains("localStorage.getItem('savedAddresses')"));
        assert!(page.contains("saveIdentity"));
        assert!(page.contains("deleteSavedIdentity"));
    }

    #[test]
    fn test_values_are_html_escaped() {
        let mut identity = test_identity();
        identity.name = "<script>alert(1)</script>".to_string();
        let page = render_page(&identity);

        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_copy_values_are_js_escaped() {
        let mut identity = test_identity();
        identity.name = "O'Brien".to_string();
        let page = render_page(&identity);

        assert!(page.contains("copyToClipboard('O\\u0027Brien', this)"));
    }

    #[test]
    fn test_phone_copy_value_is_bare() {
        let page = render_page(&test_identity());
        assert!(page.contains("copyToClipboard('+41761234567', this)"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = render_error_page("boom <b>bold</b>");
        assert!(page.contains("Oops! Something went wrong."));
        assert!(page.contains("boom &lt;b&gt;bold&lt;/b&gt;"));
        assert!(!page.contains("<b>bold</b>"));
    }

    #[test]
    fn test_bare_phone() {
        assert_eq!(bare_phone("+61 4 1234 5678"), "+61412345678");
        assert_eq!(bare_phone("(02) 555-1234"), "025551234");
    }

    #[test]
    fn test_js_escape() {
        assert_eq!(js_escape("O'Brien"), "O\\u0027Brien");
        assert_eq!(js_escape("a\\b"), "a\\\\b");
        assert_eq!(js_escape("<tag>"), "\\u003ctag\\u003e");
    }
}
