use std::ops::ControlFlow;

use futures_util::StreamExt;
use iter_api::impls::ordered_hash::OrderedHash;
use iter_api::HashApiRO;
use iter_api::HashTransform;
use iter_api::HashTraversal;
use iter_api::IntegerStepper;
use iter_api::Num;
use iter_api::Stepper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut stock = OrderedHash::from([("apple", 3), ("pear", 0), ("plum", 7)]);

    // Walk with a callback
    stock.each_with(|k, v| println!("{}: {}", k, v));

    // Or keep the enumerator and pull from it later
    let names = stock.each_key();
    println!("{} has {} keys", names, names.iter().count());

    // Merge in a delivery, adding counts for fruit already in stock
    let delivery = OrderedHash::from([("pear", 5), ("fig", 2)]);
    let merged = stock.merge_with(&[&delivery], |_k, old, new| old + new)?;
    println!("after delivery: {:?}", merged);

    // Drop everything sold out, in place
    match stock.reject_in_place_with(|_k, v| *v == 0) {
        Some(h) => println!("removed sold out fruit: {:?}", h),
        None => println!("nothing sold out"),
    }
    println!("in stock: {:?}", stock.keys());

    // Numeric sequences
    3i64.times_with(|i| println!("tick {}", i));

    let evens = 0i64.step(Some(Num::Int(10)), 2)?;
    let evens = evens.into_stream().collect::<Vec<_>>().await;
    println!("evens: {:?}", evens);

    let mut first = vec![];
    let flow = 1.0f64.try_step_with(None, 0.25, |x| {
        first.push(x);
        if first.len() == 4 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;
    println!("first quarters: {:?}, stopped early: {}", first, flow.is_break());

    Ok(())
}
