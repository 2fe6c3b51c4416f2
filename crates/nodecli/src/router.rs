//! Dispatch of a recognised command to exactly one node call.

use std::io::Write;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::coerce::{Lookup, RpcParam, block_id};
use crate::output::{write_line, write_value};
use crate::rpc::{ConnectionGuard, NodeRpc};
use crate::{Amount, AppError, CommandInvocation, CommandKind};

/// Confirmation target used when `fee` is given none.
pub(crate) const DEFAULT_FEE_TARGET: u32 = 1;

/// Largest integer a fee rate may carry when the node encodes it as a float.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const TX_NOT_FOUND: &str = "TX not found.";
const COIN_NOT_FOUND: &str = "Coin not found.";
const BLOCK_NOT_FOUND: &str = "Block not found.";
const HEADER_NOT_FOUND: &str = "Header not found.";
const FILTER_NOT_FOUND: &str = "Filter not found.";
const FEE_NOT_FOUND: &str = "Fee not found.";
const FEE_NOT_INTEGER: &str = "Fee is not an integer.";
const BROADCASTED: &str = "Broadcasted:";
const CHAIN_RESET: &str = "Chain has been reset.";

/// Routes `invocation` through `client`, closing the client afterwards
/// whether or not the command succeeded.
pub(crate) fn dispatch<C, W>(
    invocation: CommandInvocation,
    client: C,
    out: &mut W,
) -> Result<(), AppError>
where
    C: NodeRpc,
    W: Write,
{
    let guard = ConnectionGuard::new(client);
    route(invocation, guard.client(), out)
}

/// Runs the handler for `invocation`, issuing at most one node call.
pub(crate) fn route<C, W>(
    mut invocation: CommandInvocation,
    client: &C,
    out: &mut W,
) -> Result<(), AppError>
where
    C: NodeRpc,
    W: Write,
{
    debug!(command = %invocation.kind(), "routing command");
    match invocation.kind() {
        CommandKind::Info => write_value(out, &client.info()?),
        CommandKind::Mempool => write_value(out, &client.mempool()?),
        CommandKind::Broadcast => broadcast(&mut invocation, client, out),
        CommandKind::Tx => tx(&mut invocation, client, out),
        CommandKind::Coin => coin(&mut invocation, client, out),
        CommandKind::Block => {
            let block = block_id(invocation.take_positional("hash or height")?);
            write_or_missing(out, client.block(&block)?, BLOCK_NOT_FOUND)
        }
        CommandKind::Header => {
            let block = block_id(invocation.take_positional("hash or height")?);
            write_or_missing(out, client.header(&block)?, HEADER_NOT_FOUND)
        }
        CommandKind::Filter => {
            let block = block_id(invocation.take_positional("hash or height")?);
            write_or_missing(out, client.filter(&block)?, FILTER_NOT_FOUND)
        }
        CommandKind::Fee => fee(&mut invocation, client, out),
        CommandKind::Reset => {
            let block = block_id(invocation.take_positional("height or hash")?);
            client.reset(&block)?;
            write_line(out, CHAIN_RESET)
        }
        CommandKind::Rpc => rpc(&mut invocation, client, out),
    }
}

fn write_or_missing<W: Write>(out: &mut W, value: Value, missing: &str) -> Result<(), AppError> {
    if value.is_null() {
        return write_line(out, missing);
    }
    write_value(out, &value)
}

fn broadcast<C: NodeRpc, W: Write>(
    invocation: &mut CommandInvocation,
    client: &C,
    out: &mut W,
) -> Result<(), AppError> {
    let named = invocation.take_named("tx");
    let raw = invocation
        .next_positional()
        .or(named)
        .ok_or_else(|| invocation.missing("tx"))?;
    let result = client.broadcast(&raw)?;
    write_line(out, BROADCASTED)?;
    write_value(out, &result)
}

fn tx<C: NodeRpc, W: Write>(
    invocation: &mut CommandInvocation,
    client: &C,
    out: &mut W,
) -> Result<(), AppError> {
    match Lookup::classify(invocation.take_positional("hash or address")?) {
        Lookup::Hash(hash) => write_or_missing(out, client.tx(&hash)?, TX_NOT_FOUND),
        Lookup::Address(address) => write_value(out, &client.txs_by_address(&address)?),
    }
}

fn coin<C: NodeRpc, W: Write>(
    invocation: &mut CommandInvocation,
    client: &C,
    out: &mut W,
) -> Result<(), AppError> {
    match Lookup::classify(invocation.take_positional("hash or address")?) {
        Lookup::Hash(hash) => {
            let index = invocation.take_positional("index")?;
            if index.parse::<u32>().is_err() {
                return Err(invocation.invalid("index", index));
            }
            write_or_missing(out, client.coin(&hash, &index)?, COIN_NOT_FOUND)
        }
        Lookup::Address(address) => write_value(out, &client.coins_by_address(&address)?),
    }
}

fn fee<C: NodeRpc, W: Write>(
    invocation: &mut CommandInvocation,
    client: &C,
    out: &mut W,
) -> Result<(), AppError> {
    let named = invocation.take_named("target");
    let target = match invocation.next_positional().or(named) {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| invocation.invalid("target", raw.clone()))?,
        None => DEFAULT_FEE_TARGET,
    };

    let estimate = client.estimate_fee(target)?;
    if estimate.is_null() {
        return write_line(out, FEE_NOT_FOUND);
    }
    match estimate.get("rate").and_then(integer_rate) {
        Some(rate) => {
            let rendered = Amount::from_base_units(rate).to_string();
            write_value(out, &json!({ "rate": rendered }))
        }
        None => write_line(out, FEE_NOT_INTEGER),
    }
}

/// Accepts integral JSON numbers, including floats with no fractional part.
fn integer_rate(rate: &Value) -> Option<i128> {
    let Value::Number(number) = rate else {
        return None;
    };
    if let Some(rate) = number.as_i64() {
        return Some(i128::from(rate));
    }
    if let Some(rate) = number.as_u64() {
        return Some(i128::from(rate));
    }
    let rate = number.as_f64()?;
    if rate.fract() != 0.0 || rate.abs() > MAX_SAFE_INTEGER {
        return None;
    }
    Some(rate as i128)
}

fn rpc<C: NodeRpc, W: Write>(
    invocation: &mut CommandInvocation,
    client: &C,
    out: &mut W,
) -> Result<(), AppError> {
    let method = invocation.take_positional("method")?;
    let params: Vec<Value> = invocation
        .drain()
        .map(|token| Value::from(RpcParam::parse(&token)))
        .collect();
    match client.execute(&method, params) {
        Ok(result) => write_value(out, &result),
        Err(error) if error.is_rpc() => {
            warn!(%method, %error, "node rejected procedure call");
            write_line(out, &error.to_string())
        }
        Err(error) => Err(error.into()),
    }
}
