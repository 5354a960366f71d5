//! 将上游响应精简为持久化记录

use super::types::{Carrier, QuoteEntry};
use super::upstream::PricingResponse;

/// 只取第一个 dispatcher，按报价顺序逐条转换，不排序、不去重
///
/// 无 dispatcher 时返回空承运商列表，创建时间同样记为当前时间。
pub fn format_response(resp: &PricingResponse) -> QuoteEntry {
    let carriers = resp
        .dispatchers
        .first()
        .map(|dispatcher| {
            dispatcher
                .offers
                .iter()
                .map(|offer| Carrier {
                    name: offer.carrier.name.clone(),
                    service: offer.modal.clone(),
                    deadline: offer.carrier_original_delivery_time.days,
                    price: offer.final_price,
                })
                .collect()
        })
        .unwrap_or_default();

    QuoteEntry::new(carriers)
}
