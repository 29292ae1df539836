use yew::prelude::*;

use crate::model::{self, Mark};

#[derive(Properties, PartialEq, Clone)]
pub struct SquareProps {
    pub value: Option<Mark>,
    pub clickable: bool,
    pub on_click: Callback<()>,
}

#[function_component(Square)]
pub fn square(props: &SquareProps) -> Html {
    let onclick = {
        let cb = props.on_click.clone();
        let clickable = props.clickable;
        Callback::from(move |_| {
            if clickable {
                cb.emit(())
            }
        })
    };
    let (content, color) = match props.value {
        Some(Mark::X) => ("X", "#58a6ff"),
        Some(Mark::O) => ("O", "#f0883e"),
        None => ("", "inherit"),
    };
    let label = if content.is_empty() {
        "Empty square".to_string()
    } else {
        format!("Square with {content}")
    };
    let dim = if props.clickable || props.value.is_some() { "1" } else { "0.5" };
    let cursor = if props.clickable { "pointer" } else { "not-allowed" };
    html! {
        <button
            onclick={onclick}
            disabled={!props.clickable}
            aria-label={label}
            style={format!("width:110px; height:110px; font-size:56px; font-weight:700; background:#161b22; border:2px solid #30363d; border-radius:12px; color:{color}; opacity:{dim}; cursor:{cursor};")}
        >
            { content }
        </button>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct BoardProps {
    pub cells: model::Board,
    pub is_my_turn: bool,
    pub on_cell: Callback<usize>,
}

#[function_component(Board)]
pub fn board(props: &BoardProps) -> Html {
    html! {
        <div style="display:grid; grid-template-columns:repeat(3, 110px); gap:8px;">
            { for props.cells.iter().enumerate().map(|(i, cell)| {
                let cb = props.on_cell.clone();
                html! {
                    <Square
                        key={i}
                        value={*cell}
                        clickable={props.is_my_turn && cell.is_none()}
                        on_click={Callback::from(move |_| cb.emit(i))}
                    />
                }
            }) }
        </div>
    }
}
