// Website configuration editor. The whole config loads as one record into a
// shared `FormState`; the section sidebar gates which editor renders, not
// what is loaded. Each section saves independently through the save tracker.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::save_badge::{schedule_revert, SaveBadge};
use crate::components::session::{use_session, Capability};
use crate::components::toast::use_toasts;
use crate::services::site;
use crate::state::form::{Field, FormState};
use crate::state::save_tracker::{
    SaveEvent, SaveState, SaveTracker, ERROR_REVERT_MS, SAVED_REVERT_MS,
};
use haven_shared::WebsiteConfig;

const SECTIONS: &[(&str, &str)] = &[
    ("hero", "Hero"),
    ("seo", "SEO"),
    ("branding", "Branding"),
    ("footer", "Footer"),
    ("contact", "Contact"),
    ("metadata", "Metadata"),
];

type ConfigField = Field<WebsiteConfig, String>;
type OptConfigField = Field<WebsiteConfig, Option<String>>;

const HERO_TITLE: ConfigField = Field::new(|c| &c.hero.title, |c, v| c.hero.title = v);
const HERO_SUBTITLE: ConfigField = Field::new(|c| &c.hero.subtitle, |c, v| c.hero.subtitle = v);
const HERO_CTA: ConfigField = Field::new(|c| &c.hero.cta_label, |c, v| c.hero.cta_label = v);
const HERO_IMAGE: OptConfigField = Field::new(|c| &c.hero.image_url, |c, v| c.hero.image_url = v);
const HERO_VIDEO: OptConfigField = Field::new(|c| &c.hero.video_url, |c, v| c.hero.video_url = v);

const SEO_TITLE: ConfigField = Field::new(|c| &c.seo.meta_title, |c, v| c.seo.meta_title = v);
const SEO_DESCRIPTION: ConfigField =
    Field::new(|c| &c.seo.meta_description, |c, v| c.seo.meta_description = v);
const SEO_KEYWORDS: ConfigField = Field::new(|c| &c.seo.keywords, |c, v| c.seo.keywords = v);

const BRAND_NAME: ConfigField =
    Field::new(|c| &c.branding.site_name, |c, v| c.branding.site_name = v);
const BRAND_PRIMARY: ConfigField =
    Field::new(|c| &c.branding.primary_color, |c, v| c.branding.primary_color = v);
const BRAND_SECONDARY: ConfigField = Field::new(
    |c| &c.branding.secondary_color,
    |c, v| c.branding.secondary_color = v,
);
const BRAND_LOGO: OptConfigField =
    Field::new(|c| &c.branding.logo_url, |c, v| c.branding.logo_url = v);

const FOOTER_TAGLINE: ConfigField =
    Field::new(|c| &c.footer.tagline, |c, v| c.footer.tagline = v);
const FOOTER_COPYRIGHT: ConfigField =
    Field::new(|c| &c.footer.copyright, |c, v| c.footer.copyright = v);
const FOOTER_FACEBOOK: OptConfigField =
    Field::new(|c| &c.footer.facebook_url, |c, v| c.footer.facebook_url = v);
const FOOTER_INSTAGRAM: OptConfigField =
    Field::new(|c| &c.footer.instagram_url, |c, v| c.footer.instagram_url = v);

const CONTACT_PHONE: ConfigField = Field::new(|c| &c.contact.phone, |c, v| c.contact.phone = v);
const CONTACT_EMAIL: ConfigField = Field::new(|c| &c.contact.email, |c, v| c.contact.email = v);
const CONTACT_ADDRESS: ConfigField =
    Field::new(|c| &c.contact.address, |c, v| c.contact.address = v);

const META_LOCALE: ConfigField =
    Field::new(|c| &c.metadata.locale, |c, v| c.metadata.locale = v);
const META_CURRENCY: ConfigField =
    Field::new(|c| &c.metadata.currency, |c, v| c.metadata.currency = v);
const META_ANALYTICS: OptConfigField = Field::new(
    |c| &c.metadata.analytics_id,
    |c, v| c.metadata.analytics_id = v,
);

// The upload and save continuations run after renders the handlers never saw,
// so the form is driven through a reducer rather than `set()` on a stale clone.
pub enum ConfigAction {
    Reset(WebsiteConfig),
    Set(ConfigField, String),
    SetOpt(OptConfigField, Option<String>),
}

impl yew::functional::Reducible for FormState<WebsiteConfig> {
    type Action = ConfigAction;

    fn reduce(self: Rc<Self>, action: ConfigAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ConfigAction::Reset(config) => next.reset(config),
            ConfigAction::Set(field, value) => next.set(field, value),
            ConfigAction::SetOpt(field, value) => next.set(field, value),
        }
        Rc::new(next)
    }
}

#[function_component(SiteSettingsPage)]
pub fn site_settings_page() -> Html {
    let session = use_session();
    let toasts = use_toasts();
    let form = use_reducer(|| FormState::new(WebsiteConfig::default()));
    let loading = use_state(|| true);
    let active_section = use_state(|| "hero");
    let tracker = use_reducer(|| {
        SaveTracker::new(&["hero", "seo", "branding", "footer", "contact", "metadata"])
    });

    {
        let form = form.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Ok(config) = site::get_config().await {
                    form.dispatch(ConfigAction::Reset(config));
                }
                loading.set(false);
            });
            || ()
        });
    }

    if !session.can(Capability::ManageSite) {
        return html! {
            <div class="p-6 max-w-3xl mx-auto">
                <div class="px-4 py-3 rounded-lg text-sm" style="background-color: var(--color-warning-bg); color: var(--color-warning);">
                    {"You do not have permission to manage the website configuration"}
                </div>
            </div>
        };
    }

    let section: &'static str = *active_section;

    let bind = {
        let form = form.clone();
        let tracker = tracker.clone();
        move |field: ConfigField| {
            let form = form.clone();
            let tracker = tracker.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                form.dispatch(ConfigAction::Set(field, input.value()));
                tracker.dispatch((section, SaveEvent::Edited));
            })
        }
    };

    // Optional URLs/ids: a cleared input stores None, not "".
    let bind_opt = {
        let form = form.clone();
        let tracker = tracker.clone();
        move |field: OptConfigField| {
            let form = form.clone();
            let tracker = tracker.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let value = input.value();
                form.dispatch(ConfigAction::SetOpt(field, (!value.is_empty()).then_some(value)));
                tracker.dispatch((section, SaveEvent::Edited));
            })
        }
    };

    let on_save = {
        let form = form.clone();
        let tracker = tracker.clone();
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            if tracker.state(section) != SaveState::Modified {
                return;
            }
            tracker.dispatch((section, SaveEvent::SaveStarted));

            let config = form.value().clone();
            let form = form.clone();
            let tracker = tracker.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match site::update_config(&config).await {
                    Ok(saved) => {
                        form.dispatch(ConfigAction::Reset(saved));
                        tracker.dispatch((section, SaveEvent::SaveSucceeded));
                        schedule_revert(tracker.clone(), section, SAVED_REVERT_MS);
                    }
                    Err(e) => {
                        toasts.error(format!("Could not save configuration: {}", e.message));
                        tracker.dispatch((section, SaveEvent::SaveFailed));
                        schedule_revert(tracker.clone(), section, ERROR_REVERT_MS);
                    }
                }
            });
        })
    };

    let on_upload = {
        let form = form.clone();
        let tracker = tracker.clone();
        let toasts = toasts.clone();
        move |kind: &'static str, field: OptConfigField| {
            let form = form.clone();
            let tracker = tracker.clone();
            let toasts = toasts.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };
                let form = form.clone();
                let tracker = tracker.clone();
                let toasts = toasts.clone();
                spawn_local(async move {
                    let upload = match kind {
                        "image" => site::upload_hero_image(file).await,
                        _ => site::upload_hero_video(file).await,
                    };
                    match upload {
                        Ok(response) => {
                            form.dispatch(ConfigAction::SetOpt(field, Some(response.url)));
                            tracker.dispatch(("hero", SaveEvent::Edited));
                            toasts.success("Upload complete");
                        }
                        Err(e) => toasts.error(format!("Upload failed: {}", e.message)),
                    }
                });
            })
        }
    };

    let on_remove_media = {
        let form = form.clone();
        let tracker = tracker.clone();
        let toasts = toasts.clone();
        move |kind: &'static str, field: OptConfigField| {
            let form = form.clone();
            let tracker = tracker.clone();
            let toasts = toasts.clone();
            Callback::from(move |_: MouseEvent| {
                let form = form.clone();
                let tracker = tracker.clone();
                let toasts = toasts.clone();
                spawn_local(async move {
                    match site::delete_hero_media(kind).await {
                        Ok(()) => {
                            form.dispatch(ConfigAction::SetOpt(field, None));
                            tracker.dispatch(("hero", SaveEvent::Edited));
                        }
                        Err(e) => toasts.error(format!("Could not remove media: {}", e.message)),
                    }
                });
            })
        }
    };

    let text_field = |label: &'static str, field: ConfigField| {
        html! {
            <div>
                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">
                    {label}
                </label>
                <input
                    type="text"
                    class="w-full px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={form.get(field).clone()}
                    oninput={bind(field)}
                />
            </div>
        }
    };

    let opt_field = |label: &'static str, field: OptConfigField| {
        html! {
            <div>
                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">
                    {label}
                </label>
                <input
                    type="text"
                    class="w-full px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={form.get(field).clone().unwrap_or_default()}
                    oninput={bind_opt(field)}
                />
            </div>
        }
    };

    let section_body = match section {
        "hero" => html! {
            <div class="space-y-3">
                {text_field("Title", HERO_TITLE)}
                {text_field("Subtitle", HERO_SUBTITLE)}
                {text_field("Call-to-action label", HERO_CTA)}

                <div class="grid grid-cols-1 sm:grid-cols-2 gap-4 pt-2">
                    <MediaSlot
                        label="Hero image"
                        url={form.get(HERO_IMAGE).clone()}
                        accept="image/*"
                        onchange={on_upload("image", HERO_IMAGE)}
                        on_remove={on_remove_media("image", HERO_IMAGE)}
                    />
                    <MediaSlot
                        label="Hero video"
                        url={form.get(HERO_VIDEO).clone()}
                        accept="video/*"
                        onchange={on_upload("video", HERO_VIDEO)}
                        on_remove={on_remove_media("video", HERO_VIDEO)}
                    />
                </div>
            </div>
        },
        "seo" => {
            let seo_description_oninput = {
                let form = form.clone();
                let tracker = tracker.clone();
                Callback::from(move |e: InputEvent| {
                    let area: HtmlTextAreaElement = e.target_unchecked_into();
                    form.dispatch(ConfigAction::Set(SEO_DESCRIPTION, area.value()));
                    tracker.dispatch(("seo", SaveEvent::Edited));
                })
            };
            html! {
                <div class="space-y-3">
                    {text_field("Meta title", SEO_TITLE)}
                    <div>
                        <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">
                            {"Meta description"}
                        </label>
                        <textarea
                            rows="3"
                            class="w-full px-3 py-2 rounded-lg text-sm"
                            style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                            value={form.get(SEO_DESCRIPTION).clone()}
                            oninput={seo_description_oninput}
                        />
                    </div>
                    {text_field("Keywords", SEO_KEYWORDS)}
                </div>
            }
        }
        "branding" => html! {
            <div class="space-y-3">
                {text_field("Site name", BRAND_NAME)}
                {opt_field("Logo URL", BRAND_LOGO)}
                <div class="grid grid-cols-2 gap-3">
                    {text_field("Primary color", BRAND_PRIMARY)}
                    {text_field("Secondary color", BRAND_SECONDARY)}
                </div>
            </div>
        },
        "footer" => html! {
            <div class="space-y-3">
                {text_field("Tagline", FOOTER_TAGLINE)}
                {text_field("Copyright line", FOOTER_COPYRIGHT)}
                {opt_field("Facebook URL", FOOTER_FACEBOOK)}
                {opt_field("Instagram URL", FOOTER_INSTAGRAM)}
            </div>
        },
        "contact" => html! {
            <div class="space-y-3">
                {text_field("Phone", CONTACT_PHONE)}
                {text_field("Email", CONTACT_EMAIL)}
                {text_field("Address", CONTACT_ADDRESS)}
            </div>
        },
        _ => html! {
            <div class="space-y-3">
                {text_field("Locale", META_LOCALE)}
                {text_field("Currency", META_CURRENCY)}
                {opt_field("Analytics ID", META_ANALYTICS)}
            </div>
        },
    };

    let section_title = SECTIONS
        .iter()
        .find(|(name, _)| *name == section)
        .map(|(_, label)| *label)
        .unwrap_or("Section");

    html! {
        <div class="p-6 max-w-5xl mx-auto space-y-4">
            <div class="flex items-center space-x-3">
                <h1 class="text-2xl font-bold" style="color: var(--fg-primary);">{"Website Settings"}</h1>
                if tracker.any_changes() {
                    <span class="text-xs" style="color: var(--color-warning);">{"Unsaved sections"}</span>
                }
            </div>

            if *loading {
                <div class="flex justify-center py-12">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2" style="border-color: var(--accent-primary);"></div>
                </div>
            } else {
                <div class="flex gap-4">
                    <nav class="w-40 flex-shrink-0 space-y-1">
                        { for SECTIONS.iter().map(|(name, label)| {
                            let name: &'static str = *name;
                            let active = section == name;
                            let active_section = active_section.clone();
                            let style = if active {
                                "background-color: var(--bg-highlight); color: var(--fg-primary);"
                            } else {
                                "color: var(--fg-muted);"
                            };
                            html! {
                                <button
                                    class="w-full text-left px-3 py-2 rounded-lg text-sm flex items-center justify-between"
                                    {style}
                                    onclick={Callback::from(move |_| active_section.set(name))}
                                >
                                    <span>{*label}</span>
                                    if tracker.has_changes(name) && !active {
                                        <span class="w-1.5 h-1.5 rounded-full" style="background-color: var(--color-warning);"></span>
                                    }
                                </button>
                            }
                        })}
                    </nav>

                    <div class="flex-1 rounded-lg p-4 space-y-4" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
                        <div class="flex items-center justify-between">
                            <h2 class="font-semibold" style="color: var(--fg-primary);">{section_title}</h2>
                            <div class="flex items-center space-x-3">
                                <SaveBadge state={tracker.state(section)} />
                                <button
                                    onclick={on_save}
                                    disabled={tracker.state(section) != SaveState::Modified}
                                    class="px-3 py-1.5 rounded-lg text-sm font-medium disabled:opacity-40"
                                    style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                                >
                                    {"Save"}
                                </button>
                            </div>
                        </div>
                        {section_body}
                    </div>
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MediaSlotProps {
    label: &'static str,
    url: Option<String>,
    accept: &'static str,
    onchange: Callback<Event>,
    on_remove: Callback<MouseEvent>,
}

#[function_component(MediaSlot)]
fn media_slot(props: &MediaSlotProps) -> Html {
    html! {
        <div class="space-y-2">
            <label class="block text-sm font-medium" style="color: var(--fg-secondary);">
                {props.label}
            </label>
            if let Some(url) = &props.url {
                <div class="space-y-2">
                    if props.accept.starts_with("image") {
                        <img src={url.clone()} class="w-full h-32 object-cover rounded-lg" alt={props.label} />
                    } else {
                        <video src={url.clone()} class="w-full h-32 object-cover rounded-lg" controls=true />
                    }
                    <button
                        onclick={props.on_remove.clone()}
                        class="text-xs"
                        style="color: var(--color-error);"
                    >
                        {"Remove"}
                    </button>
                </div>
            } else {
                <input
                    type="file"
                    accept={props.accept}
                    class="w-full text-sm"
                    style="color: var(--fg-muted);"
                    onchange={props.onchange.clone()}
                />
            }
        </div>
    }
}
