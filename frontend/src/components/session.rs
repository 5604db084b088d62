// Session and capability context. The token and user are restored from
// localStorage, identity plus granted capabilities are refreshed once per
// provider mount, and views ask `session.can(...)` instead of re-deriving
// permissions ad hoc.

use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::{session, ApiClient};
use haven_shared::{Task, User, UserComment};

const USER_STORAGE_KEY: &str = "haven_user";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    EditAllTasks,
    DeleteAllTasks,
    ManageSite,
}

impl Capability {
    /// The capability strings the auth service grants.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::EditAllTasks => "tasks.edit_all",
            Capability::DeleteAllTasks => "tasks.delete_all",
            Capability::ManageSite => "site.manage",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub user: Option<User>,
    pub login: Callback<session::LoginResponse>,
    pub logout: Callback<()>,
}

impl SessionContext {
    pub fn can(&self, capability: Capability) -> bool {
        self.user
            .as_ref()
            .map(|u| u.capabilities.iter().any(|c| c == capability.as_str()))
            .unwrap_or(false)
    }

    /// Task rows expose edit only to their creator or holders of the
    /// edit-all capability.
    pub fn can_edit_task(&self, task: &Task) -> bool {
        match &self.user {
            Some(user) => task.created_by == user.id || self.can(Capability::EditAllTasks),
            None => false,
        }
    }

    pub fn can_delete_task(&self, task: &Task) -> bool {
        match &self.user {
            Some(user) => task.created_by == user.id || self.can(Capability::DeleteAllTasks),
            None => false,
        }
    }

    pub fn can_edit_comment(&self, comment: &UserComment) -> bool {
        match &self.user {
            Some(user) => comment.author_id == user.id,
            None => false,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let user = use_state(|| LocalStorage::get::<User>(USER_STORAGE_KEY).ok());

    // Refresh identity and capabilities once per mount; a stale or revoked
    // token degrades to the logged-out state.
    {
        let user = user.clone();
        use_effect_with((), move |_| {
            if ApiClient::is_authenticated() {
                spawn_local(async move {
                    match session::current_user().await {
                        Ok(fresh) => {
                            let _ = LocalStorage::set(USER_STORAGE_KEY, &fresh);
                            user.set(Some(fresh));
                        }
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("Session refresh failed: {}", e).into(),
                            );
                            ApiClient::clear_auth_token();
                            LocalStorage::delete(USER_STORAGE_KEY);
                            user.set(None);
                        }
                    }
                });
            }
            || ()
        });
    }

    let login = {
        let user = user.clone();
        Callback::from(move |response: session::LoginResponse| {
            let _ = LocalStorage::set(USER_STORAGE_KEY, &response.user);
            user.set(Some(response.user));
        })
    };

    let logout = {
        let user = user.clone();
        Callback::from(move |_| {
            // Revocation still needs the token, so the header is cleared
            // only after the call settles. The UI logs out immediately.
            spawn_local(async {
                session::logout().await;
                ApiClient::clear_auth_token();
            });
            LocalStorage::delete(USER_STORAGE_KEY);
            user.set(None);
        })
    };

    let context = SessionContext {
        user: (*user).clone(),
        login,
        logout,
    };

    html! {
        <ContextProvider<SessionContext> {context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not found")
}

// ===== Login form =====

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub on_login: Callback<session::LoginResponse>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error_message = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let error_message = error_message.clone();
        let loading = loading.clone();
        let on_login = props.on_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let email = (*email).clone();
            let password = (*password).clone();
            if email.is_empty() || password.is_empty() {
                error_message.set(Some("Please fill in all fields".to_string()));
                return;
            }

            loading.set(true);
            error_message.set(None);

            let error_message = error_message.clone();
            let loading = loading.clone();
            let on_login = on_login.clone();
            spawn_local(async move {
                match session::login(&email, &password).await {
                    Ok(response) => {
                        loading.set(false);
                        on_login.emit(response);
                    }
                    Err(e) => {
                        loading.set(false);
                        error_message.set(Some(e.message));
                    }
                }
            });
        })
    };

    let email_oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let password_oninput = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center px-4" style="background-color: var(--bg-primary);">
            <div class="max-w-md w-full space-y-8">
                <div class="text-center">
                    <h2 class="text-3xl font-bold" style="color: var(--fg-primary);">
                        {"Sign in to Haven"}
                    </h2>
                    <p class="mt-2 text-sm" style="color: var(--fg-muted);">
                        {"Real Estate CRM"}
                    </p>
                </div>

                <form class="mt-8 space-y-6" {onsubmit}>
                    <div class="space-y-3">
                        <input
                            type="email"
                            autocomplete="email"
                            required=true
                            placeholder="Email address"
                            class="w-full px-3 py-2 rounded-lg text-sm"
                            style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                            value={(*email).clone()}
                            oninput={email_oninput}
                        />
                        <input
                            type="password"
                            autocomplete="current-password"
                            required=true
                            placeholder="Password"
                            class="w-full px-3 py-2 rounded-lg text-sm"
                            style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                            value={(*password).clone()}
                            oninput={password_oninput}
                        />
                    </div>

                    if let Some(error) = (*error_message).clone() {
                        <div class="px-4 py-3 rounded-lg text-sm" style="background-color: var(--color-error-bg); color: var(--color-error);">
                            {error}
                        </div>
                    }

                    <button
                        type="submit"
                        disabled={*loading}
                        class="w-full py-2 px-4 rounded-lg text-sm font-medium disabled:opacity-50 disabled:cursor-not-allowed"
                        style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                    >
                        {if *loading { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
