use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub start_game: Callback<()>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    let start_cb = props.start_game.clone();
    let start_btn = Callback::from(move |_| start_cb.emit(()));
    let card = "flex:1; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:12px; padding:18px;";
    html! {
        <div style="max-width:720px; margin:0 auto; padding:64px 16px; text-align:center; display:flex; flex-direction:column; gap:28px;">
            <div>
                <h1 style="margin:0 0 12px 0; font-size:40px; color:#58a6ff;">{"Tic Tac Toe Arena"}</h1>
                <p style="margin:0; font-size:18px; opacity:0.8;">{"Challenge your friends in this epic multiplayer battle!"}</p>
            </div>
            <div style="display:flex; gap:16px; flex-wrap:wrap;">
                <div style={card}>
                    <h3 style="margin:0 0 6px 0; color:#58a6ff;">{"Real-time Multiplayer"}</h3>
                    <p style="margin:0; opacity:0.7;">{"Challenge players in intense real-time matches"}</p>
                </div>
                <div style={card}>
                    <h3 style="margin:0 0 6px 0; color:#f0883e;">{"Timed Turns"}</h3>
                    <p style="margin:0; opacity:0.7;">{"Pick normal or fast mode and beat the clock"}</p>
                </div>
            </div>
            <div>
                <button onclick={start_btn} style="padding:14px 36px; font-size:18px; font-weight:700; background:#238636; color:#fff; border:none; border-radius:10px; cursor:pointer;">{"Play Now"}</button>
            </div>
        </div>
    }
}
