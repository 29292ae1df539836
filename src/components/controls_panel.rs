use yew::prelude::*;

use crate::config::GameMode;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub mode: GameMode,
    pub on_mode: Callback<GameMode>,
    pub searching: bool,
    pub connected: bool,
    pub on_find: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let find_cb = {
        let cb = props.on_find.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let mode_button = |mode: GameMode| {
        let cb = props.on_mode.clone();
        let active = props.mode == mode;
        let border = if active { "#58a6ff" } else { "#30363d" };
        html! {
            <button
                onclick={Callback::from(move |_| cb.emit(mode))}
                disabled={props.searching}
                style={format!("flex:1; padding:10px; background:#161b22; color:inherit; border:2px solid {border}; border-radius:8px; cursor:pointer;")}
            >
                { mode.label() }
                <div style="font-size:12px; opacity:0.7;">{ format!("{}s per turn", mode.turn_secs()) }</div>
            </button>
        }
    };
    let find_label = if props.searching { "Finding Match..." } else { "Find Match" };
    html! {<div style="width:100%; display:flex; flex-direction:column; gap:12px;">
        <div style="display:flex; gap:8px;">
            { mode_button(GameMode::Normal) }
            { mode_button(GameMode::Fast) }
        </div>
        <button
            onclick={find_cb}
            disabled={props.searching || !props.connected}
            style="padding:14px 28px; font-size:18px; font-weight:700; background:#238636; color:#fff; border:none; border-radius:10px; cursor:pointer;"
        >
            { find_label }
        </button>
    </div>}
}
