use crate::commands::print_json;
use anyhow::Result;
use serde::Serialize;
use vallink_core::{Theme, MESSAGE_TEMPLATES};

#[derive(Debug, Serialize)]
struct TemplateItem {
    position: usize,
    text: &'static str,
}

#[derive(Debug, Serialize)]
struct ThemeItem {
    id: &'static str,
    name: &'static str,
}

pub fn list_templates(json: bool) -> Result<()> {
    let items: Vec<TemplateItem> = MESSAGE_TEMPLATES
        .iter()
        .enumerate()
        .map(|(index, &text)| TemplateItem {
            position: index + 1,
            text,
        })
        .collect();

    if json {
        return print_json(&items);
    }
    for item in items {
        println!("{}. {}", item.position, item.text);
    }
    Ok(())
}

pub fn list_themes(json: bool) -> Result<()> {
    let items: Vec<ThemeItem> = Theme::ALL
        .iter()
        .map(|theme| ThemeItem {
            id: theme.id(),
            name: theme.display_name(),
        })
        .collect();

    if json {
        return print_json(&items);
    }
    for item in items {
        println!("{:<10} {}", item.id, item.name);
    }
    Ok(())
}
