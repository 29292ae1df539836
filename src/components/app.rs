use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{intro_overlay::IntroOverlay, match_view::MatchView};
use crate::config::ServerConfig;
use crate::controller;
use crate::model::{MatchAction, ViewState};
use crate::net::{NakamaChannel, Session};
use crate::util::{clog, cwarn};

#[derive(PartialEq, Clone)]
enum View {
    Intro,
    Game,
}

const CONNECTING_MESSAGE: &str = "Connecting...";
const CONNECT_FAILED_MESSAGE: &str = "Server Error: could not connect";
const DISCONNECTED_MESSAGE: &str = "Connection lost, reload to reconnect";

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Intro);
    let match_state = use_reducer(ViewState::default);
    let channel = use_state(|| None::<NakamaChannel>);

    // Authenticate and open the realtime socket once; the socket lives as
    // long as the app.
    {
        let dispatcher = match_state.dispatcher();
        let channel = channel.clone();
        use_effect_with((), move |_| {
            let config = ServerConfig::load();
            let connected = Rc::new(RefCell::new(None::<NakamaChannel>));
            {
                let connected = connected.clone();
                spawn_local(async move {
                    dispatcher.dispatch(MatchAction::Notice(CONNECTING_MESSAGE.to_string()));
                    let session = match Session::authenticate(&config).await {
                        Ok(session) => session,
                        Err(err) => {
                            cwarn(&format!("authentication failed: {err}"));
                            dispatcher.dispatch(MatchAction::Notice(CONNECT_FAILED_MESSAGE.to_string()));
                            return;
                        }
                    };
                    clog(&format!("authenticated as {}", session.user_id));
                    let on_match_data = {
                        let dispatcher = dispatcher.clone();
                        let user_id = session.user_id.clone();
                        Rc::new(move |op_code: i64, data: Vec<u8>| {
                            if let Some(action) =
                                controller::handle_match_data(&user_id, op_code, &data)
                            {
                                dispatcher.dispatch(action);
                            }
                        })
                    };
                    let on_close = {
                        let dispatcher = dispatcher.clone();
                        Rc::new(move || {
                            dispatcher.dispatch(MatchAction::Reset);
                            dispatcher.dispatch(MatchAction::Notice(DISCONNECTED_MESSAGE.to_string()));
                        })
                    };
                    match NakamaChannel::connect(&config, &session, on_match_data, on_close).await {
                        Ok(handle) => {
                            *connected.borrow_mut() = Some(handle.clone());
                            dispatcher.dispatch(MatchAction::Reset);
                            channel.set(Some(handle));
                        }
                        Err(err) => {
                            cwarn(&format!("socket connect failed: {err}"));
                            dispatcher.dispatch(MatchAction::Notice(CONNECT_FAILED_MESSAGE.to_string()));
                        }
                    }
                });
            }
            move || {
                if let Some(handle) = connected.borrow_mut().take() {
                    handle.disconnect();
                }
            }
        });
    }

    let start_game = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Game))
    };
    let to_intro = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Intro))
    };

    html! {
        <div id="root" style="min-height:100vh; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            {
                match *view {
                    View::Intro => html! { <IntroOverlay start_game={start_game} /> },
                    View::Game => html! {
                        <MatchView
                            match_state={match_state.clone()}
                            channel={(*channel).clone()}
                            to_intro={to_intro}
                        />
                    },
                }
            }
        </div>
    }
}
