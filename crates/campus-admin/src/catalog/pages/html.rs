use htmlescape::{encode_attribute, encode_minimal};

use super::flash::{Flash, FlashLevel};
use crate::catalog::validation::ValidationErrors;
use crate::i18n::{MessageCatalog, MessageKey};

pub(crate) fn layout(
    messages: &MessageCatalog,
    title: &str,
    flash: Option<&Flash>,
    body: &str,
) -> String {
    let notice = flash.map(notice).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/sectors">{sectors}</a> | <a href="/classes">{classes}</a></nav>
<main>
<h1>{title}</h1>
{notice}{body}
</main>
</body>
</html>
"#,
        lang = messages.locale().tag(),
        title = encode_minimal(title),
        sectors = encode_minimal(&messages.text(MessageKey::PageSectors)),
        classes = encode_minimal(&messages.text(MessageKey::PageClasses)),
    )
}

fn notice(flash: &Flash) -> String {
    let class = match flash.level {
        FlashLevel::Success => "notice notice-success",
        FlashLevel::Error => "notice notice-error",
    };
    format!(
        "<p class=\"{class}\" role=\"status\">{}</p>\n",
        encode_minimal(&flash.message)
    )
}

pub(crate) fn field_error(errors: &ValidationErrors, field: &str) -> String {
    errors
        .message_for(field)
        .map(|message| {
            format!(
                "<span class=\"field-error\">{}</span>",
                encode_minimal(message)
            )
        })
        .unwrap_or_default()
}

pub(crate) fn text_input(
    label: &str,
    field: &str,
    value: &str,
    errors: &ValidationErrors,
) -> String {
    format!(
        "<p><label for=\"{field}\">{label}</label> \
<input type=\"text\" id=\"{field}\" name=\"{field}\" value=\"{value}\"> {error}</p>\n",
        label = encode_minimal(label),
        value = encode_attribute(value),
        error = field_error(errors, field),
    )
}

/// `<select>` over `(value, label)` pairs with an empty leading option.
pub(crate) fn select(
    label: &str,
    field: &str,
    options: &[(String, String)],
    selected: Option<&str>,
    errors: &ValidationErrors,
) -> String {
    let mut html = format!(
        "<p><label for=\"{field}\">{label}</label> <select id=\"{field}\" name=\"{field}\">\n\
<option value=\"\">--</option>\n",
        label = encode_minimal(label),
    );
    for (value, text) in options {
        let marker = if selected == Some(value.as_str()) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{}\"{marker}>{}</option>\n",
            encode_attribute(value),
            encode_minimal(text)
        ));
    }
    html.push_str(&format!("</select> {}</p>\n", field_error(errors, field)));
    html
}

/// Submit button plus a cancel link back to `cancel_href`.
pub(crate) fn form_actions(messages: &MessageCatalog, cancel_href: &str) -> String {
    format!(
        "<p><button type=\"submit\">{save}</button> <a href=\"{href}\">{cancel}</a></p>\n",
        save = encode_minimal(&messages.text(MessageKey::ActionSave)),
        href = encode_attribute(cancel_href),
        cancel = encode_minimal(&messages.text(MessageKey::ActionCancel)),
    )
}

pub(crate) fn delete_button(messages: &MessageCatalog, action: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\" class=\"inline\"><button type=\"submit\">{}</button></form>",
        encode_attribute(action),
        encode_minimal(&messages.text(MessageKey::ActionDelete))
    )
}
