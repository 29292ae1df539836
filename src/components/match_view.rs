use gloo::timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{
    board::Board, controls_panel::ControlsPanel, game_over_overlay::GameOverOverlay,
    time_display::TimeDisplay,
};
use crate::config::GameMode;
use crate::controller;
use crate::model::{MatchAction, ViewState};
use crate::net::NakamaChannel;
use crate::util::now_ms;

const NOT_CONNECTED_MESSAGE: &str = "Not connected to the server yet";

#[derive(Properties, PartialEq, Clone)]
pub struct MatchViewProps {
    pub match_state: UseReducerHandle<ViewState>,
    pub channel: Option<NakamaChannel>,
    pub to_intro: Callback<()>,
}

#[function_component(MatchView)]
pub fn match_view(props: &MatchViewProps) -> Html {
    let mode = use_state(GameMode::default);
    let state = (*props.match_state).clone();

    // Countdown ticker exists exactly while a deadline is set; the effect
    // cleanup drops (and so cancels) the interval.
    {
        let dispatcher = props.match_state.dispatcher();
        use_effect_with(state.deadline, move |deadline| {
            let ticker = (*deadline).map(|_| {
                dispatcher.dispatch(MatchAction::Tick { now_ms: now_ms() });
                Interval::new(1_000, move || {
                    dispatcher.dispatch(MatchAction::Tick { now_ms: now_ms() });
                })
            });
            move || drop(ticker)
        });
    }

    let on_cell = {
        let match_state = props.match_state.clone();
        let channel = props.channel.clone();
        Callback::from(move |cell: usize| {
            let action = match &channel {
                Some(channel) => controller::request_move(&match_state, channel, cell),
                None => MatchAction::Notice(NOT_CONNECTED_MESSAGE.to_string()),
            };
            match_state.dispatch(action);
        })
    };

    let on_find = {
        let match_state = props.match_state.clone();
        let channel = props.channel.clone();
        let mode = mode.clone();
        Callback::from(move |_| {
            let Some(channel) = channel.clone() else {
                match_state.dispatch(MatchAction::Notice(NOT_CONNECTED_MESSAGE.to_string()));
                return;
            };
            let searching = match_state.searching;
            let dispatcher = match_state.dispatcher();
            let mode = *mode;
            spawn_local(async move {
                controller::find_match(searching, mode, &channel, move |a| dispatcher.dispatch(a))
                    .await;
            });
        })
    };

    let on_mode = {
        let mode = mode.clone();
        Callback::from(move |m: GameMode| mode.set(m))
    };

    let on_play_again = {
        let dispatcher = props.match_state.dispatcher();
        Callback::from(move |_| controller::play_again(|a| dispatcher.dispatch(a)))
    };

    let on_leave = {
        let dispatcher = props.match_state.dispatcher();
        let channel = props.channel.clone();
        Callback::from(move |_| {
            let dispatcher = dispatcher.clone();
            match channel.clone() {
                Some(channel) => spawn_local(async move {
                    controller::leave_match(&channel, move |a| dispatcher.dispatch(a)).await;
                }),
                None => controller::play_again(move |a| dispatcher.dispatch(a)),
            }
        })
    };

    let back = {
        let cb = props.to_intro.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let show_timer = state.deadline.is_some() && state.match_active;
    let match_over = !state.match_active && !state.searching && state.local_mark.is_some();
    let your_mark = state
        .local_mark
        .map(|m| format!("You are {}", m.symbol()))
        .unwrap_or_default();

    html! {
        <div style="max-width:390px; margin:0 auto; padding-top:48px; display:flex; flex-direction:column; align-items:center; gap:24px;">
            <div style="width:100%; text-align:center;">
                <h2 style="margin:0 0 8px 0; font-size:26px; color:#58a6ff;">{ state.status.clone() }</h2>
                <div style="font-size:13px; opacity:0.7; min-height:16px;">{ your_mark }</div>
                { if show_timer { html! { <TimeDisplay millis_remaining={state.millis_remaining} /> } } else { html! {} } }
            </div>
            { if !state.match_active {
                html! {
                    <ControlsPanel
                        mode={*mode}
                        on_mode={on_mode}
                        searching={state.searching}
                        connected={props.channel.is_some()}
                        on_find={on_find}
                    />
                }
            } else { html! {} } }
            <Board
                cells={state.board}
                is_my_turn={state.match_active && state.is_my_turn()}
                on_cell={on_cell}
            />
            <GameOverOverlay show={match_over} on_play_again={on_play_again} on_leave={on_leave} />
            <button onclick={back} style="font-size:12px; opacity:0.6; background:none; border:none; color:inherit; cursor:pointer;">{"Back to Home"}</button>
        </div>
    }
}
