/*!
 * memarena demo
 *
 * Fragments an arena as much as possible, releases everything again with a
 * free-list dump after each step, then checks for leaks. Finishes with a
 * short pooled-list run.
 */

use memarena::monitoring::span_operation;
use memarena::{init_tracing, ArenaAllocator, ArenaConfig, PoolConfig, PooledList, UNIT_SIZE};
use std::mem::size_of;
use tracing::info;

fn main() -> miette::Result<()> {
    init_tracing();

    let config = ArenaConfig::from_env()?;
    info!(
        min_chunk_units = config.min_chunk_units,
        max_units = ?config.max_units,
        "memarena demo starting"
    );

    let mut arena = ArenaAllocator::with_config(&config);
    arena.visualize("start");

    // Fragment the arena
    let span = span_operation("fragment");
    let mut pc = Some(arena.allocate(size_of::<u8>())?);
    let mut ps = Some(arena.allocate(100 * size_of::<u8>())?);
    let mut pd = Some(arena.allocate(50 * size_of::<i64>())?);
    let mut pdd = Some(arena.allocate(100 * size_of::<i64>())?);
    let mut pcc = Some(arena.allocate(size_of::<u8>())?);
    let mut pccc = Some(arena.allocate(size_of::<u8>())?);
    span.record_items_processed(6);
    drop(span);

    println!();
    {
        let span = span_operation("release");

        arena.free(&mut pccc);
        // second free of the same slot does nothing
        arena.free(&mut pccc);
        arena.visualize("free(the last char)");

        arena.free(&mut pdd);
        arena.visualize("free(lot of longs)");

        arena.free(&mut ps);
        arena.visualize("free(string)");

        arena.free(&mut pd);
        arena.visualize("free(less longs)");

        arena.free(&mut pc);
        arena.visualize("free(first char)");

        arena.free(&mut pcc);
        arena.visualize("free(second char)");

        span.record_items_processed(6);
    }

    let claimed = arena.claimed_units();
    let free = arena.free_block_count();
    println!();
    println!(
        "--- Memory claimed  : {} blocks ({} bytes)",
        claimed,
        claimed * UNIT_SIZE
    );
    println!(
        "    Free memory now : {} blocks ({} bytes)",
        free,
        free * UNIT_SIZE
    );
    if free == claimed {
        println!("    No memory leaks detected.");
    } else {
        let leaked = claimed.saturating_sub(free);
        println!(
            "    (!) Leaking memory: {} blocks ({} bytes).",
            leaked,
            leaked * UNIT_SIZE
        );
    }

    run_pooled_list(&PoolConfig::from_env()?);

    println!("// Done.\n");
    Ok(())
}

fn run_pooled_list(config: &PoolConfig) {
    let _span = span_operation("pooled_list");
    let mut list = PooledList::with_config(config);

    for value in 1..=3 {
        list.append(value);
    }
    let node = list.append(4);
    list.append(5);

    list.remove(node);
    let node = list.append(6);
    list.append(7);
    list.remove(node);

    let values: Vec<_> = list.iter().map(|v| v.to_string()).collect();
    println!();
    println!(
        "--- Pooled list: [{}] in {} pool(s) of {}",
        values.join(", "),
        list.pool_count(),
        list.capacity()
    );
    list.release();
}
