//! Controls shared by the tab and bookmark cards
use std::rc::Rc;

use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::debounce::{debounce, Debouncer};
use crate::group_name::GroupName;

#[derive(Properties, PartialEq)]
pub struct GroupNameEditorProps {
    pub name: GroupName,
    pub placeholder: AttrValue,
    pub delay_ms: u32,
    #[prop_or(false)]
    pub disabled: bool,
    pub on_change: Callback<GroupName>,
}

/// Emoji and text of a group name. Text edits are debounced; an emoji change
/// is written right away.
#[function_component(GroupNameEditor)]
pub fn group_name_editor(props: &GroupNameEditorProps) -> Html {
    let debouncer = use_memo((), |_| Debouncer::<GroupName>::new());

    let on_text_input = {
        let debouncer = Rc::clone(&debouncer);
        let name = props.name.clone();
        let delay_ms = props.delay_ms;
        let on_change = props.on_change.clone();

        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let renamed = name.with_text(input.value().trim());
                let on_change = on_change.clone();
                debounce(Rc::clone(&debouncer), renamed, delay_ms, move |renamed| {
                    on_change.emit(renamed)
                });
            }
        })
    };

    let on_emoji_change = {
        let name = props.name.clone();
        let on_change = props.on_change.clone();

        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let emoji = GroupName::from_string(input.value().trim()).emoji;
                on_change.emit(name.with_emoji(emoji));
            }
        })
    };

    html! {
        <div class="group-name">
            <input
                class="group-name-emoji"
                type="text"
                size="2"
                value={props.name.emoji.clone()}
                placeholder="🙂"
                disabled={props.disabled}
                onchange={on_emoji_change}
            />
            <span class="group-name-divider" />
            <input
                class="group-name-text"
                type="text"
                value={props.name.text.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                oninput={on_text_input}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupTargetInputProps {
    /// Used to tie the input to its datalist
    pub list_id: AttrValue,
    pub group_names: Rc<Vec<GroupName>>,
    pub on_input: Callback<String>,
    #[prop_or_default]
    pub children: Children,
}

/// Free-text group name with the known names offered as suggestions, followed
/// by the action buttons passed as children
#[function_component(GroupTargetInput)]
pub fn group_target_input(props: &GroupTargetInputProps) -> Html {
    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_input.emit(input.value());
            }
        })
    };

    html! {
        <div class="group-target">
            <input
                type="text"
                class="group-target-input"
                placeholder="move"
                list={props.list_id.clone()}
                oninput={on_input}
            />
            <datalist id={props.list_id.clone()}>
                {for props.group_names.iter().map(|name| html! {
                    <option value={name.to_string()} />
                })}
            </datalist>
            {props.children.clone()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ActionButtonProps {
    pub onclick: Callback<MouseEvent>,
    pub label: AttrValue,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(ActionButton)]
pub fn action_button(props: &ActionButtonProps) -> Html {
    html! {
        <Button onclick={props.onclick.clone()} disabled={props.disabled} variant={ButtonVariant::Secondary}>
            {props.label.clone()}
        </Button>
    }
}

#[derive(Properties, PartialEq)]
pub struct RowCheckboxProps {
    pub checked: bool,
    pub on_toggle: Callback<()>,
}

#[function_component(RowCheckbox)]
pub fn row_checkbox(props: &RowCheckboxProps) -> Html {
    let on_toggle = props.on_toggle.reform(|_: Event| ());
    html! {
        <input type="checkbox" class="row-select" checked={props.checked} onchange={on_toggle} />
    }
}
