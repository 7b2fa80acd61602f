//! Fee-free constant product pricing. Intermediate products are computed in
//! 256 bits and every rounding step favours the pool.

use cosmwasm_std::{Uint128, Uint256};

use crate::CoinswapError;

/// Input needed to take exactly `output_amount` out of the pool:
/// `ceil(input_reserve * output_amount / (output_reserve - output_amount))`.
pub fn exact_output_input(
    input_reserve: Uint128,
    output_reserve: Uint128,
    output_amount: Uint128,
) -> Result<Uint128, CoinswapError> {
    if output_amount >= output_reserve {
        return Err(CoinswapError::InsufficientLiquidity {
            reason: format!(
                "requested {output_amount} but the pool only holds {output_reserve}"
            ),
        });
    }
    mul_div_ceil(
        input_reserve,
        output_amount,
        output_reserve.checked_sub(output_amount)?,
    )
}

/// Output bought by exactly `input_amount`:
/// `floor(input_amount * output_reserve / (input_reserve + input_amount))`.
pub fn exact_input_output(
    input_reserve: Uint128,
    output_reserve: Uint128,
    input_amount: Uint128,
) -> Result<Uint128, CoinswapError> {
    let denominator = Uint256::from(input_reserve).checked_add(Uint256::from(input_amount))?;
    let output = input_amount
        .full_mul(output_reserve)
        .checked_div(denominator)?;
    Ok(Uint128::try_from(output)?)
}

pub fn mul_div_floor(a: Uint128, b: Uint128, c: Uint128) -> Result<Uint128, CoinswapError> {
    let result = a.full_mul(b).checked_div(Uint256::from(c))?;
    Ok(Uint128::try_from(result)?)
}

pub fn mul_div_ceil(a: Uint128, b: Uint128, c: Uint128) -> Result<Uint128, CoinswapError> {
    let numerator = a.full_mul(b);
    let denominator = Uint256::from(c);
    let mut result = numerator.checked_div(denominator)?;
    if !numerator.checked_rem(denominator)?.is_zero() {
        result = result.checked_add(Uint256::one())?;
    }
    Ok(Uint128::try_from(result)?)
}
