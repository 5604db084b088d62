// Transient success/error banners. Success toasts dismiss after ~2s,
// error toasts linger for ~5s. The taxonomy is deliberately just
// success-vs-failure.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

pub const SUCCESS_DISMISS_MS: u32 = 2_000;
pub const ERROR_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, PartialEq)]
pub struct ToastHandle {
    push: Callback<(ToastKind, String)>,
}

impl ToastHandle {
    pub fn success(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Success, message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push.emit((ToastKind::Error, message.into()));
    }
}

// Dismiss timers fire long after the render they were armed in, so the stack
// is driven through a reducer rather than `set()` on a stale clone.
#[derive(Clone, PartialEq, Default)]
struct ToastStack {
    entries: Vec<Toast>,
}

enum ToastAction {
    Push(Toast),
    Dismiss(u64),
}

impl yew::functional::Reducible for ToastStack {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(toast) => next.entries.push(toast),
            ToastAction::Dismiss(id) => next.entries.retain(|t| t.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(ToastStack::default);
    let next_id = use_mut_ref(|| 0u64);

    let push = {
        let toasts = toasts.clone();
        Callback::from(move |(kind, message): (ToastKind, String)| {
            let id = {
                let mut counter = next_id.borrow_mut();
                *counter += 1;
                *counter
            };

            toasts.dispatch(ToastAction::Push(Toast { id, kind, message }));

            let delay = match kind {
                ToastKind::Success => SUCCESS_DISMISS_MS,
                ToastKind::Error => ERROR_DISMISS_MS,
            };
            let toasts = toasts.clone();
            Timeout::new(delay, move || toasts.dispatch(ToastAction::Dismiss(id))).forget();
        })
    };

    let handle = ToastHandle { push };

    html! {
        <ContextProvider<ToastHandle> context={handle}>
            { props.children.clone() }
            <div class="fixed bottom-4 right-4 space-y-2 z-50">
                { for toasts.entries.iter().map(|toast| {
                    let style = match toast.kind {
                        ToastKind::Success =>
                            "background-color: var(--color-success-bg); color: var(--color-success); border: 1px solid var(--color-success);",
                        ToastKind::Error =>
                            "background-color: var(--color-error-bg); color: var(--color-error); border: 1px solid var(--color-error);",
                    };
                    html! {
                        <div key={toast.id} class="px-4 py-3 rounded-lg shadow-lg text-sm max-w-sm" {style}>
                            {&toast.message}
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastHandle>>
    }
}

#[hook]
pub fn use_toasts() -> ToastHandle {
    use_context::<ToastHandle>().expect("ToastHandle not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::functional::Reducible;

    fn toast(id: u64, message: &str) -> Toast {
        Toast {
            id,
            kind: ToastKind::Success,
            message: message.to_string(),
        }
    }

    #[test]
    fn expiring_toast_does_not_clobber_later_ones() {
        // The first toast's timer fires after a second toast was pushed; only
        // the expired entry may go.
        let stack = Rc::new(ToastStack::default());
        let stack = stack.reduce(ToastAction::Push(toast(1, "saved")));
        let stack = stack.reduce(ToastAction::Push(toast(2, "uploaded")));
        let stack = stack.reduce(ToastAction::Dismiss(1));

        assert_eq!(stack.entries.len(), 1);
        assert_eq!(stack.entries[0].id, 2);
        assert_eq!(stack.entries[0].message, "uploaded");
    }

    #[test]
    fn dismissing_an_already_gone_toast_is_a_no_op() {
        let stack = Rc::new(ToastStack::default());
        let stack = stack.reduce(ToastAction::Push(toast(1, "saved")));
        let stack = stack.reduce(ToastAction::Dismiss(7));

        assert_eq!(stack.entries.len(), 1);
    }
}
