use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    pub on_play_again: Callback<()>,
    pub on_leave: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let again_cb = props.on_play_again.clone();
    let again_btn = Callback::from(move |_| again_cb.emit(()));
    let leave_btn = {
        let cb = props.on_leave.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="width:100%; display:flex; gap:12px; justify-content:center;">
            <button onclick={again_btn} style="flex:1; padding:10px; background:#238636; color:#fff; border:none; border-radius:8px;">{"Play Again"}</button>
            <button onclick={leave_btn} style="flex:1; padding:10px; background:none; color:inherit; border:1px solid #30363d; border-radius:8px;">{"Leave Game"}</button>
        </div>
    }
}
