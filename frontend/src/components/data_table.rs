// Spreadsheet-style contact table with manually resizable columns. The
// drag math lives in `state::columns`; this component wires it to pointer
// events and commits the widths into component state on pointer-up.

use web_sys::{HtmlElement, PointerEvent};
use yew::prelude::*;

use crate::state::columns::{ColumnDrag, ColumnWidths};
use haven_shared::Contact;

const COLUMNS: &[&str] = &["Name", "Email", "Phone", "Roles", "Created"];

#[derive(Properties, PartialEq)]
pub struct ContactTableProps {
    pub contacts: Vec<Contact>,
    pub on_select: Callback<i64>,
}

#[function_component(ContactTable)]
pub fn contact_table(props: &ContactTableProps) -> Html {
    let widths = use_state(|| ColumnWidths::new(COLUMNS.len()));
    let drag = use_mut_ref(|| None::<ColumnDrag>);

    let on_resize_down = {
        let widths = widths.clone();
        let drag = drag.clone();
        Callback::from(move |(column, e): (usize, PointerEvent)| {
            e.prevent_default();
            e.stop_propagation();
            // Keep receiving moves even when the cursor leaves the handle.
            if let Some(target) = e.target_dyn_into::<HtmlElement>() {
                let _ = target.set_pointer_capture(e.pointer_id());
            }
            *drag.borrow_mut() = Some(widths.begin_drag(column, e.client_x() as f64));
        })
    };

    let on_resize_move = {
        let widths = widths.clone();
        let drag = drag.clone();
        Callback::from(move |e: PointerEvent| {
            if let Some(active) = *drag.borrow() {
                let mut next = (*widths).clone();
                next.drag_to(&active, e.client_x() as f64);
                widths.set(next);
            }
        })
    };

    let on_resize_up = {
        let drag = drag.clone();
        Callback::from(move |_e: PointerEvent| {
            // The last move already wrote the final width; just end the drag.
            *drag.borrow_mut() = None;
        })
    };

    html! {
        <div class="overflow-x-auto rounded-lg" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
            <table class="w-full" style="table-layout: fixed;">
                <thead>
                    <tr style="background-color: var(--bg-tertiary);">
                        { for COLUMNS.iter().enumerate().map(|(index, label)| {
                            let on_down = {
                                let on_resize_down = on_resize_down.clone();
                                Callback::from(move |e: PointerEvent| on_resize_down.emit((index, e)))
                            };
                            html! {
                                <th
                                    class="relative text-left py-3 px-4 text-xs font-medium uppercase tracking-wider select-none"
                                    style={format!("color: var(--fg-muted); width: {}px;", widths.width(index))}
                                >
                                    {*label}
                                    <span
                                        class="absolute top-0 right-0 h-full w-1.5 cursor-col-resize"
                                        style="touch-action: none;"
                                        onpointerdown={on_down}
                                        onpointermove={on_resize_move.clone()}
                                        onpointerup={on_resize_up.clone()}
                                    />
                                </th>
                            }
                        })}
                    </tr>
                </thead>
                <tbody>
                    { for props.contacts.iter().map(|contact| {
                        let id = contact.id;
                        let on_select = props.on_select.clone();
                        html! {
                            <tr
                                key={id}
                                class="cursor-pointer hover:opacity-80"
                                style="border-top: 1px solid var(--border-primary);"
                                onclick={Callback::from(move |_| on_select.emit(id))}
                            >
                                <td class="py-3 px-4 truncate font-medium" style="color: var(--fg-primary);">
                                    {contact.full_name()}
                                </td>
                                <td class="py-3 px-4 truncate text-sm" style="color: var(--fg-secondary);">
                                    {contact.email.as_deref().unwrap_or("—")}
                                </td>
                                <td class="py-3 px-4 truncate text-sm" style="color: var(--fg-secondary);">
                                    {contact.phone.as_deref().unwrap_or("—")}
                                </td>
                                <td class="py-3 px-4 truncate">
                                    <RoleBadges contact={contact.clone()} />
                                </td>
                                <td class="py-3 px-4 truncate text-sm" style="color: var(--fg-muted);">
                                    {contact.created_at.format("%Y-%m-%d").to_string()}
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
            if props.contacts.is_empty() {
                <div class="p-8 text-center text-sm" style="color: var(--fg-muted);">
                    {"No contacts match the current filters"}
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RoleBadgesProps {
    pub contact: Contact,
}

#[function_component(RoleBadges)]
pub fn role_badges(props: &RoleBadgesProps) -> Html {
    let contact = &props.contact;
    let mut badges: Vec<(&'static str, &'static str)> = Vec::new();
    if contact.is_owner {
        badges.push(("Owner", "var(--color-success)"));
    }
    if contact.is_buyer {
        badges.push(("Buyer", "var(--accent-primary)"));
    }
    if contact.is_interested {
        badges.push(("Interested", "var(--color-warning)"));
    }
    if badges.is_empty() {
        if let Some(legacy) = contact.contact_type.as_deref() {
            let label = match legacy {
                "owner" => "Owner",
                "buyer" => "Buyer",
                "interested" => "Interested",
                _ => legacy,
            };
            return html! {
                <span class="px-2 py-0.5 text-xs rounded" style="background-color: var(--bg-highlight); color: var(--fg-muted);">
                    {label.to_string()}
                </span>
            };
        }
    }

    html! {
        <span class="space-x-1">
            { for badges.iter().map(|(label, color)| html! {
                <span
                    class="px-2 py-0.5 text-xs rounded"
                    style={format!("background-color: {}20; color: {}", color, color)}
                >
                    {*label}
                </span>
            })}
        </span>
    }
}
