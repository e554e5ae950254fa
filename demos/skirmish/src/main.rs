//! Skirmish demo
//!
//! Walks the whole asset lifecycle on a fresh chain: deploy a collection,
//! mint two items of different classes, spend allocation points, fight a
//! battle and heal the loser with a consumable.

use roost_game::{ItemStats, PriceTable, UpgradeRequest, NANO};
use roost_ledger::contracts::{collection, item};
use roost_ledger::{Chain, CollectionConfig, RoyaltyParams};

fn print_stats(label: &str, stats: &ItemStats) {
    println!(
        "  {label}: hp {}/{}  energy {}/{}  atk {} def {} spd {}  exp {} (unallocated {})",
        stats.hp,
        stats.max_hp,
        stats.energy,
        stats.max_energy,
        stats.atk,
        stats.def,
        stats.spd,
        stats.exp,
        stats.unallocated(),
    );
}

fn main() -> roost_ledger::Result<()> {
    println!("=== Roost Skirmish Demo ===\n");

    let mut chain = Chain::new();
    let deployer = chain.treasury("deployer");
    let alice = chain.treasury("alice");
    let bob = chain.treasury("bob");

    let config = CollectionConfig {
        owner: deployer,
        collection_url: "https://roost.example/collection.json".into(),
        common_url: "https://roost.example/items/".into(),
        royalty: RoyaltyParams {
            factor: 5,
            base: 100,
            address: deployer,
        },
        prices: PriceTable::standard(),
    };
    let coll = chain.deploy_collection(&config, NANO)?;
    println!("Deployed collection at {coll}\n");

    // Alice buys a balanced class, Bob an attacker
    chain.send(alice, coll, NANO + NANO / 10, collection::purchase_class_body(1, 7)?)?;
    let alice_item = chain.nft_address_by_index(coll, 1)?;
    chain.send(bob, coll, NANO + NANO / 10, collection::purchase_class_body(2, 8)?)?;
    let bob_item = chain.nft_address_by_index(coll, 2)?;

    println!("Minted items:");
    print_stats("alice #1 (class 7)", &chain.nft_stats(alice_item)?);
    print_stats("bob   #2 (class 8)", &chain.nft_stats(bob_item)?);
    println!();

    // Alice spends her five starting points
    let request = UpgradeRequest {
        atk: 2,
        def: 1,
        spd: 0,
        max_hp: 1,
        max_energy: 1,
    };
    chain.send(alice, alice_item, NANO / 20, item::upgrade_body(3, &request)?)?;
    println!("Alice upgraded her item:");
    print_stats("alice #1", &chain.nft_stats(alice_item)?);
    println!();

    // The battle runs as three messages: battle, challenge, battle_end
    let records = chain.send(alice, alice_item, NANO / 10, item::battle_body(4, bob_item)?)?;
    println!("Battle of #1 vs #2 ({} transactions):", records.len());
    for record in &records {
        println!(
            "  {} -> {}  op {:?}  exit {}",
            record.from,
            record.to,
            record.op.map(|op| format!("{op:08x}")),
            record.exit_code,
        );
    }
    print_stats("alice #1", &chain.nft_stats(alice_item)?);
    print_stats("bob   #2", &chain.nft_stats(bob_item)?);
    println!();

    // Bob heals his fainted item with a consumable
    chain.send(bob, coll, NANO / 5, collection::purchase_item_body(5, 45, 2)?)?;
    println!("Bob bought a full restore for #2:");
    print_stats("bob   #2", &chain.nft_stats(bob_item)?);

    println!("\nProcessed {} transactions in total", chain.trace().len());
    Ok(())
}
