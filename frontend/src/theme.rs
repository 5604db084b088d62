// Haven theme system: CSS-variable palettes toggled via a data attribute.

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

const THEME_STORAGE_KEY: &str = "haven_theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Slate,
    Midnight,
    Linen,
    Olive,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Slate => "slate",
            Theme::Midnight => "midnight",
            Theme::Linen => "linen",
            Theme::Olive => "olive",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Slate => "Slate",
            Theme::Midnight => "Midnight",
            Theme::Linen => "Linen",
            Theme::Olive => "Olive",
        }
    }

    pub fn all() -> [Theme; 4] {
        [Theme::Slate, Theme::Midnight, Theme::Linen, Theme::Olive]
    }

    pub fn from_str(s: &str) -> Option<Theme> {
        match s {
            "slate" => Some(Theme::Slate),
            "midnight" => Some(Theme::Midnight),
            "linen" => Some(Theme::Linen),
            "olive" => Some(Theme::Olive),
            _ => None,
        }
    }

    /// Accent color used for the selector swatches.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Theme::Slate => "#60a5fa",
            Theme::Midnight => "#818cf8",
            Theme::Linen => "#b45309",
            Theme::Olive => "#84cc16",
        }
    }
}

pub fn apply_theme(theme: Theme) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let Some(root) = document.document_element() {
                if let Ok(html) = root.dyn_into::<HtmlElement>() {
                    html.set_attribute("data-theme", theme.as_str()).ok();
                }
            }
        }
    }
}

pub fn load_theme() -> Theme {
    LocalStorage::get::<String>(THEME_STORAGE_KEY)
        .ok()
        .and_then(|s| Theme::from_str(&s))
        .unwrap_or_default()
}

pub fn save_theme(theme: Theme) {
    let _ = LocalStorage::set(THEME_STORAGE_KEY, theme.as_str());
}

// ===== Theme Context =====

#[derive(Clone, PartialEq)]
pub struct ThemeContext {
    pub theme: Theme,
    pub set_theme: Callback<Theme>,
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Html,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let theme = use_state(load_theme);

    {
        let theme = theme.clone();
        use_effect_with(*theme, move |theme| {
            apply_theme(*theme);
            || ()
        });
    }

    let set_theme = {
        let theme = theme.clone();
        Callback::from(move |new_theme: Theme| {
            save_theme(new_theme);
            theme.set(new_theme);
        })
    };

    let ctx = ThemeContext {
        theme: *theme,
        set_theme,
    };

    html! {
        <ContextProvider<ThemeContext> context={ctx}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}

#[hook]
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found")
}

// ===== Theme Selector =====

#[function_component(ThemeSelector)]
pub fn theme_selector() -> Html {
    let theme_ctx = use_theme();
    let show_dropdown = use_state(|| false);

    let toggle_dropdown = {
        let show_dropdown = show_dropdown.clone();
        Callback::from(move |_| show_dropdown.set(!*show_dropdown))
    };

    html! {
        <div class="relative">
            <button
                onclick={toggle_dropdown}
                class="flex items-center space-x-2 px-3 py-2 rounded-lg text-sm"
                style="background-color: var(--bg-tertiary); color: var(--fg-secondary);"
            >
                <div
                    class="w-4 h-4 rounded-full"
                    style={format!("background-color: {}", theme_ctx.theme.accent_color())}
                />
                <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7"/>
                </svg>
            </button>

            if *show_dropdown {
                <div
                    class="absolute right-0 mt-2 w-48 rounded-lg shadow-lg py-2 z-50"
                    style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);"
                >
                    { for Theme::all().iter().map(|t| {
                        let theme = *t;
                        let theme_ctx = theme_ctx.clone();
                        let show_dropdown = show_dropdown.clone();
                        let is_selected = theme_ctx.theme == theme;

                        html! {
                            <button
                                onclick={Callback::from(move |_| {
                                    theme_ctx.set_theme.emit(theme);
                                    show_dropdown.set(false);
                                })}
                                class="w-full flex items-center px-4 py-2 text-left text-sm hover:opacity-80"
                                style={if is_selected {
                                    "background-color: var(--bg-highlight); color: var(--fg-primary);"
                                } else {
                                    "color: var(--fg-secondary);"
                                }}
                            >
                                <div
                                    class="w-4 h-4 rounded-full mr-3"
                                    style={format!("background-color: {}", theme.accent_color())}
                                />
                                {theme.display_name()}
                            </button>
                        }
                    })}
                </div>
            }
        </div>
    }
}
