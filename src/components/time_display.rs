use crate::util::format_countdown;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimeDisplayProps {
    pub millis_remaining: u64,
}

#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    let urgent = props.millis_remaining < 5_000;
    let color = if urgent { "#f85149" } else { "#e6edf3" };
    html! {<div style="margin-top:12px; display:flex; justify-content:center; align-items:center; gap:10px;">
        <span style="font-size:16px; opacity:0.7;">{"Time left:"}</span>
        <span style={format!("font-size:24px; font-weight:600; font-variant-numeric:tabular-nums; color:{color};")}>
            { format_countdown(props.millis_remaining) }
        </span>
    </div>}
}
