// crates/ouch-gateway/tests/exchange_backend.rs
//
// GatewayExchange as an Exchange backend: account registration, options,
// market-data subscriptions.

use std::cell::RefCell;
use std::rc::Rc;

use exchange_core::{
    AccountEntry, AccountId, BoxedPost, Endpoint, Exchange, ExchangeBackend, Itch, ItchMsg, Ouch,
    OuchMsg, Post, Protocol,
};
use ouch_gateway::{ChannelSink, ExchangeSettings, GatewayExchange, Outcome};
use ouch_protocol::wire_types::pad_alpha;
use ouch_protocol::{decode_outbound, encode_enter_order, EnterOrder, OutboundMessage, RejectReason};

fn order_with_tif(seq: u32, time_in_force: u8) -> Vec<u8> {
    let order = EnterOrder {
        user_ref_num: seq,
        side: b'B',
        quantity: 10,
        symbol: pad_alpha("CSCO").unwrap(),
        price: 333_300,
        time_in_force,
        display: b'Y',
        capacity: b'R',
        intermarket_sweep_eligibility: b'Y',
        cross_type: b'N',
        cl_ord_id: pad_alpha("Order 1").unwrap(),
        appendage: &[],
    };
    let mut out = Vec::new();
    encode_enter_order(&order, &mut out).unwrap();
    out
}

#[test]
fn connect_registers_anonymous_account() {
    let settings = ExchangeSettings {
        accounts: vec![AccountEntry::new(
            AccountId(9),
            Protocol::Ouch,
            Endpoint::new("preset:1"),
        )],
        json_options: String::new(),
    };
    let mut exchange = Exchange::<GatewayExchange>::new(&settings);

    let _gw = exchange.connect::<Ouch, _>(&Endpoint::new("foo:bar"), |_msg: OuchMsg<'_>| {});
    exchange.subscribe::<Itch, _>(&Endpoint::new("mktdata:all"), |_msg: ItchMsg<'_>| {});

    assert_eq!(
        exchange.backend().accounts(),
        &[
            AccountEntry::new(AccountId(9), Protocol::Ouch, Endpoint::new("preset:1")),
            AccountEntry::anonymous(Protocol::Ouch, Endpoint::new("foo:bar")),
            AccountEntry::anonymous(Protocol::Itch, Endpoint::new("mktdata:all")),
        ]
    );
}

#[test]
fn time_in_force_is_not_enforced_by_default() {
    let mut exchange = Exchange::<GatewayExchange>::new(&ExchangeSettings::default());
    let mut gw = exchange.connect::<Ouch, _>(&Endpoint::new("foo:bar"), |_msg: OuchMsg<'_>| {});

    // 0x00 is not a known time in force.
    let outcome = gw.on_message(OuchMsg::new(&order_with_tif(1, 0x00))).unwrap();
    assert_eq!(outcome, Outcome::Accepted { seq: 1 });
}

#[test]
fn json_options_enable_time_in_force_checks() {
    let settings = ExchangeSettings {
        accounts: Vec::new(),
        json_options: r#"{"enforce_time_in_force": true}"#.to_string(),
    };
    let mut exchange = Exchange::<GatewayExchange>::new(&settings);
    assert!(exchange.backend().options().enforce_time_in_force);

    let (sink, mut rx) = ChannelSink::pair();
    let mut gw = exchange.connect::<Ouch, _>(&Endpoint::new("foo:bar"), sink);

    assert_eq!(
        gw.on_message(OuchMsg::new(&order_with_tif(1, b'3'))).unwrap(),
        Outcome::Accepted { seq: 1 }
    );
    assert_eq!(
        gw.on_message(OuchMsg::new(&order_with_tif(2, 0x00))).unwrap(),
        Outcome::Rejected {
            seq: 2,
            reason: RejectReason::Other
        }
    );

    let first = rx.try_recv().unwrap();
    assert!(matches!(
        decode_outbound(&first).unwrap(),
        OutboundMessage::Accepted(_)
    ));
    let second = rx.try_recv().unwrap();
    match decode_outbound(&second).unwrap() {
        OutboundMessage::Rejected(rej) => assert_eq!(rej.reason, RejectReason::Other),
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[test]
fn invalid_options_fall_back_or_fail() {
    let settings = ExchangeSettings {
        accounts: Vec::new(),
        json_options: "{ nope".to_string(),
    };

    let lenient = GatewayExchange::from_settings(&settings);
    assert!(!lenient.options().enforce_time_in_force);

    assert!(GatewayExchange::try_from_settings(&settings).is_err());
}

#[test]
fn publish_reaches_every_subscriber() {
    let mut exchange = Exchange::<GatewayExchange>::new(&ExchangeSettings::default());

    let seen = Rc::new(RefCell::new(Vec::<Vec<u8>>::new()));
    let recorder = Rc::clone(&seen);
    exchange.subscribe::<Itch, _>(&Endpoint::new("mktdata:a"), move |msg: ItchMsg<'_>| {
        recorder.borrow_mut().push(msg.as_bytes().to_vec())
    });

    // A subscriber that always fails must not starve the others.
    exchange.subscribe::<Itch, _>(&Endpoint::new("mktdata:bad"), |_msg: ItchMsg<'_>| {
        panic!("bad subscriber")
    });

    let (sink, mut rx) = ChannelSink::pair();
    exchange.subscribe::<Itch, _>(&Endpoint::new("mktdata:b"), sink);

    // Already type-erased by the caller.
    let counted = Rc::new(RefCell::new(0usize));
    let counter = Rc::clone(&counted);
    let boxed: Box<dyn Post<Itch>> =
        Box::new(move |_msg: ItchMsg<'_>| *counter.borrow_mut() += 1);
    exchange.subscribe::<Itch, _>(&Endpoint::new("mktdata:c"), BoxedPost::from(boxed));

    assert_eq!(exchange.backend().subscriber_count(), 4);

    exchange.backend_mut().publish(ItchMsg::new(b"S\x00\x00\x00\x01O"));
    exchange.backend_mut().publish(ItchMsg::new(b"H"));

    assert_eq!(
        seen.borrow().as_slice(),
        &[b"S\x00\x00\x00\x01O".to_vec(), b"H".to_vec()]
    );
    assert_eq!(rx.try_recv().unwrap(), b"S\x00\x00\x00\x01O".to_vec());
    assert_eq!(rx.try_recv().unwrap(), b"H".to_vec());
    assert_eq!(*counted.borrow(), 2);
}
